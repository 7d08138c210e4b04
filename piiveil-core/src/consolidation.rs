// piiveil-core/src/consolidation.rs
//! Entity identifier consolidation across documents.
//!
//! A document's detections are grouped into [`FileEntities`], keyed by their
//! lower-cased surface text. [`set_file_entity_ids`] then reconciles that
//! mapping against the registry of known entities: a case-insensitive exact
//! match adopts the registry id, anything else receives a fresh id above the
//! registry's current maximum. [`consolidate_pii_data`] finally copies the
//! resolved ids back onto the individual detections.
//!
//! All operations return new values; inputs are never mutated, so one
//! registry snapshot can be shared between calls. Persisting the registry
//! returned by [`update_registry`] is the caller's job, and concurrent
//! writers must be serialized by the caller.
//!
//! License: MIT OR APACHE 2.0

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::entity::{format_label, normalize, KnownEntity, PiiEntity};
use crate::errors::PiiVeilError;
use crate::observer::{LogObserver, MaskingObserver};

/// An insertion-ordered mapping from normalized surface text to the entity
/// detected in one document.
///
/// Keys are normalized on the way in and on lookup, so `"John Doe"` and
/// `"john doe"` address the same entry. Iteration follows first-detection
/// order, which makes id allocation in [`set_file_entity_ids`] reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileEntities {
    entries: Vec<(String, PiiEntity)>,
    index: HashMap<String, usize>,
}

impl FileEntities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entity stored under the normalized `key`. A
    /// replaced entry keeps its original position.
    pub fn insert(&mut self, key: &str, entity: PiiEntity) {
        let key = normalize(key);
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = entity,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, entity));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&PiiEntity> {
        self.index.get(&normalize(key)).map(|&pos| &self.entries[pos].1)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut PiiEntity> {
        match self.index.get(&normalize(key)) {
            Some(&pos) => Some(&mut self.entries[pos].1),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PiiEntity)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Hands out consecutive ids above the largest id already taken.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub(crate) fn above(taken: impl IntoIterator<Item = u64>) -> Self {
        Self { last: taken.into_iter().max().unwrap_or(0) }
    }

    pub(crate) fn next_id(&mut self) -> Result<u64, PiiVeilError> {
        let id = self
            .last
            .checked_add(1)
            .ok_or(PiiVeilError::IdSpaceExhausted { max_taken: self.last })?;
        self.last = id;
        Ok(id)
    }
}

/// Groups a document's detections by normalized text, merging the
/// occurrences of case variants into the first-seen entry.
pub fn build_file_entities(detections: &[PiiEntity]) -> FileEntities {
    let mut file_entities = FileEntities::new();
    for detection in detections {
        let key = detection.normalized();
        if let Some(existing) = file_entities.get_mut(&key) {
            existing.occurrences.extend(detection.occurrences.iter().copied());
        } else {
            file_entities.insert(&key, detection.clone());
        }
    }
    debug!(
        "Grouped {} detection(s) into {} file entit(ies)",
        detections.len(),
        file_entities.len()
    );
    file_entities
}

/// Assigns ids to file entities, reporting assignments through [`LogObserver`].
pub fn set_file_entity_ids(
    file_entities: &FileEntities,
    known_entities: &[KnownEntity],
) -> Result<FileEntities, PiiVeilError> {
    set_file_entity_ids_with(file_entities, known_entities, &LogObserver)
}

/// Returns a copy of `file_entities` in which every entry carries an id and
/// a `TYPE_ID` label.
///
/// Entries matching a known entity by case-insensitive name adopt its id and
/// its type. All other entries get consecutive ids starting at
/// `max(known ids, default 0) + 1`, in the mapping's iteration order, keeping
/// their own type. Fails with [`PiiVeilError::IdSpaceExhausted`] when a fresh
/// id would not fit in a `u64`.
pub fn set_file_entity_ids_with(
    file_entities: &FileEntities,
    known_entities: &[KnownEntity],
    observer: &dyn MaskingObserver,
) -> Result<FileEntities, PiiVeilError> {
    let known_by_name: HashMap<String, &KnownEntity> = known_entities
        .iter()
        .map(|known| (normalize(&known.name), known))
        .collect();

    let mut ids = IdAllocator::above(known_entities.iter().map(|known| known.id));

    let mut resolved = FileEntities::new();
    for (key, entity) in file_entities.iter() {
        let mut entity = entity.clone();
        match known_by_name.get(key) {
            Some(known) => {
                entity.id = Some(known.id);
                if let Some(entity_type) = known.resolved_type() {
                    entity.entity_type = entity_type;
                }
                observer.id_assigned(key, known.id, true);
            }
            None => {
                let id = ids.next_id()?;
                entity.id = Some(id);
                observer.id_assigned(key, id, false);
            }
        }
        entity.label = Some(entity.label());
        resolved.insert(key, entity);
    }
    Ok(resolved)
}

/// Copies the resolved id, type and label of each detection's file entity
/// onto a copy of the detection.
///
/// Fails with [`PiiVeilError::MissingMapping`] when a detection's normalized
/// text has no entry, and [`PiiVeilError::UnassignedId`] when the entry has
/// not been through [`set_file_entity_ids`].
pub fn consolidate_pii_data(
    pii_data: &[PiiEntity],
    file_entities: &FileEntities,
) -> Result<Vec<PiiEntity>, PiiVeilError> {
    pii_data
        .iter()
        .map(|detection| -> Result<PiiEntity, PiiVeilError> {
            let key = detection.normalized();
            let resolved = file_entities
                .get(&key)
                .ok_or_else(|| PiiVeilError::MissingMapping(key.clone()))?;
            let id = resolved.id.ok_or_else(|| PiiVeilError::UnassignedId(key.clone()))?;

            let mut consolidated = detection.clone();
            consolidated.id = Some(id);
            consolidated.entity_type = resolved.entity_type.clone();
            consolidated.label = Some(format_label(&resolved.entity_type, id));
            Ok(consolidated)
        })
        .collect()
}

/// Returns the registry extended with every file entity whose id it does not
/// hold yet. Existing entries are kept unchanged and in order.
pub fn update_registry(known_entities: &[KnownEntity], file_entities: &FileEntities) -> Vec<KnownEntity> {
    let mut registry = known_entities.to_vec();
    let mut known_ids: HashSet<u64> = known_entities.iter().map(|known| known.id).collect();

    for (_, entity) in file_entities.iter() {
        let Some(id) = entity.id else {
            warn!(
                "Skipping registry update for a {} entity without id ({} occurrence(s))",
                entity.entity_type,
                entity.occurrences.len()
            );
            continue;
        };
        if known_ids.insert(id) {
            registry.push(KnownEntity {
                id,
                name: entity.display_text().to_string(),
                label: Some(format_label(&entity.entity_type, id)),
                entity_type: Some(entity.entity_type.clone()),
            });
        }
    }
    registry
}

/// Output of [`consolidate_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedDocument {
    pub entities: Vec<PiiEntity>,
    pub registry: Vec<KnownEntity>,
}

/// Runs the full per-document flow: group, assign ids, consolidate the
/// detections and extend the registry.
pub fn consolidate_document(
    detections: &[PiiEntity],
    known_entities: &[KnownEntity],
    observer: &dyn MaskingObserver,
) -> Result<ConsolidatedDocument, PiiVeilError> {
    let file_entities = set_file_entity_ids_with(&build_file_entities(detections), known_entities, observer)?;
    let entities = consolidate_pii_data(detections, &file_entities)?;
    let registry = update_registry(known_entities, &file_entities);
    Ok(ConsolidatedDocument { entities, registry })
}
