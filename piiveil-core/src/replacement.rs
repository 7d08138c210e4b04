// piiveil-core/src/replacement.rs
//! Replacement spans produced by the masker, plus the helpers used to keep
//! sensitive surface text out of debug logs.

use serde::{Deserialize, Serialize};
use lazy_static::lazy_static;
use sha2::{Sha256, Digest};
use hex;

lazy_static! {
    /// Read once: whether raw PII may appear in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("PIIVEIL_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A single pending substitution of `[start_idx, end_idx)` by `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementSpan {
    pub start_idx: usize,
    pub end_idx: usize,
    pub replacement: String,
    /// Surface text of the entity that produced this span. The resolver uses it
    /// to tell modifier-sourced spans from detection-sourced ones.
    pub source_entity: String,
}

impl ReplacementSpan {
    pub fn new(
        start_idx: usize,
        end_idx: usize,
        replacement: impl Into<String>,
        source_entity: impl Into<String>,
    ) -> Self {
        Self {
            start_idx,
            end_idx,
            replacement: replacement.into(),
            source_entity: source_entity.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.end_idx.saturating_sub(self.start_idx)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the two ranges share at least one character position.
    /// Touching at a boundary is not an overlap.
    pub fn overlaps(&self, other: &ReplacementSpan) -> bool {
        self.start_idx < other.end_idx && other.start_idx < self.end_idx
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", len)
    }
}

/// Stable short fingerprint of a surface text, insensitive to case and
/// surrounding or repeated whitespace.
pub fn entity_fingerprint(text: &str) -> String {
    let normalized = text
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..12].to_string()
}

/// Renders a surface text for a log line: verbatim when
/// `PIIVEIL_ALLOW_DEBUG_PII=true`, otherwise redacted with its fingerprint.
pub fn loggable(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        format!("{}#{}", redact_sensitive(sensitive_content), entity_fingerprint(sensitive_content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_counts_chars() {
        assert_eq!(redact_sensitive("123456789"), "[REDACTED: 9 chars]".to_string());
        assert_eq!(redact_sensitive("Jürgen Ö"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_entity_fingerprint_consistency() {
        let h1 = entity_fingerprint("John  Doe ");
        let h2 = entity_fingerprint("john doe");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 12);
    }

    #[test]
    fn test_overlap_excludes_touching_spans() {
        let a = ReplacementSpan::new(0, 5, "[{A_1}]", "a");
        let b = ReplacementSpan::new(5, 9, "[{B_2}]", "b");
        let c = ReplacementSpan::new(4, 6, "[{C_3}]", "c");
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }
}
