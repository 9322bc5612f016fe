use std::path::{Path, PathBuf};

use serde::Serialize;

/// One ordered content block taken from a content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub order: i64,
    pub body: String,
    pub source_path: PathBuf,
}

/// Insertion-ordered collection of sections.
///
/// Sections are never merged: duplicates by order or by content are all kept,
/// and ties keep the order in which they were added.
#[derive(Debug, Clone, Default)]
pub struct SectionStore {
    sections: Vec<Section>,
}

impl SectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, order: i64, body: impl Into<String>, source_path: impl AsRef<Path>) {
        self.sections.push(Section {
            order,
            body: body.into(),
            source_path: source_path.as_ref().to_path_buf(),
        });
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections sorted by `order`, ties in insertion order. Does not mutate the store.
    pub fn ordered(&self) -> Vec<Section> {
        let mut sections = self.sections.clone();
        // `sort_by_key` is stable.
        sections.sort_by_key(|section| section.order);
        sections
    }

    pub fn into_ordered(mut self) -> Vec<Section> {
        self.sections.sort_by_key(|section| section.order);
        self.sections
    }
}
