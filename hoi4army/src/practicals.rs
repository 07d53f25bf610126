use serde::Serialize;
use std::collections::BTreeMap;

/// Per-country practical (skill) points, keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Practicals {
    points: BTreeMap<String, f64>,
}

impl Practicals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: &str, amount: f64) {
        *self.points.entry(category.to_string()).or_default() += amount;
    }

    pub fn get(&self, category: &str) -> f64 {
        self.points.get(category).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.points.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
