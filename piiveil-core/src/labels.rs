// piiveil-core/src/labels.rs
//! Label filtering: which entity types the pipeline masks at all.

use serde::{Deserialize, Serialize};

use crate::entity::PiiEntity;

/// Wildcard accepted in [`LabelFilter::detect`].
pub const ALL_LABELS: &str = "ALL";

/// Types to act on (`detect`, where `ALL` means every type) minus types to
/// skip (`ignore`). Comparisons are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LabelFilter {
    pub detect: Vec<String>,
    pub ignore: Vec<String>,
}

impl Default for LabelFilter {
    fn default() -> Self {
        Self {
            detect: vec![ALL_LABELS.to_string()],
            ignore: Vec::new(),
        }
    }
}

impl LabelFilter {
    pub fn allows(&self, entity_type: &str) -> bool {
        let listed = |labels: &[String]| labels.iter().any(|l| l.eq_ignore_ascii_case(entity_type));
        let detected = self.detect.iter().any(|l| l.eq_ignore_ascii_case(ALL_LABELS)) || listed(&self.detect);
        detected && !listed(&self.ignore)
    }

    /// Clones the entities whose type passes the filter, preserving order.
    pub fn filter<'a, I>(&self, entities: I) -> Vec<PiiEntity>
    where
        I: IntoIterator<Item = &'a PiiEntity>,
    {
        entities
            .into_iter()
            .filter(|e| self.allows(&e.entity_type))
            .cloned()
            .collect()
    }
}
