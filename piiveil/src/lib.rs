// piiveil/src/lib.rs
//! # piiveil CLI Application
//!
//! This crate provides the command-line interface for the piiveil masking
//! core: masking, id consolidation, unmasking and document formatting.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;
