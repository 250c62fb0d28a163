//! Per-item failure record

use crate::types::LoadError;

/// Append-only list of load failures
///
/// Entries stay in the order outcomes were observed, which is not necessarily
/// item order. No deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadErrors {
    entries: Vec<LoadError>,
}

impl LoadErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: LoadError) {
        self.entries.push(error);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LoadError> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[LoadError] {
        &self.entries
    }
}
