use crate::provinces::ProvinceId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Source province id -> destination province candidates.
///
/// Built by the province mapping subsystem. Candidate order is meaningful:
/// the first candidate decides whether a navy is treated as sitting on land.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationMapping {
    mapping: HashMap<u32, Vec<ProvinceId>>,
}

impl LocationMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: u32, candidates: Vec<ProvinceId>) {
        self.mapping.insert(source, candidates);
    }

    /// Destination candidates for a source province; empty when unmapped.
    pub fn candidates(&self, source: u32) -> &[ProvinceId] {
        self.mapping
            .get(&source)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

impl FromIterator<(u32, Vec<ProvinceId>)> for LocationMapping {
    fn from_iter<I: IntoIterator<Item = (u32, Vec<ProvinceId>)>>(iter: I) -> Self {
        Self {
            mapping: iter.into_iter().collect(),
        }
    }
}
