//! Regiment conversion: source regiment -> destination regiment.

use hoi4data::{ForceType, MappedType, ModelTier, SourceRegiment, TypeMappingTable, UnitType};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// A converted regiment, ship or air wing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Regiment {
    pub name: String,
    #[serde(rename = "type", serialize_with = "serialize_type_name")]
    pub unit_type: UnitType,
    /// Historical model tier.
    pub tier: ModelTier,
    /// Converted regiments always start in reserve.
    pub reserve: bool,
}

fn serialize_type_name<S: Serializer>(unit_type: &UnitType, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&unit_type.name)
}

impl Regiment {
    pub fn new(name: &str, mapped: &MappedType) -> Self {
        Self {
            name: name.to_string(),
            unit_type: mapped.unit_type.clone(),
            tier: mapped.tier,
            reserve: true,
        }
    }

    pub fn domain(&self) -> ForceType {
        self.unit_type.domain
    }

    pub fn type_name(&self) -> &str {
        &self.unit_type.name
    }
}

/// How many regiments of each source type one country has converted so
/// far. Drives the round-robin over each type's destination list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeCounters {
    counts: HashMap<String, usize>,
}

impl TypeCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source_type: &str) -> usize {
        self.counts.get(source_type).copied().unwrap_or(0)
    }

    /// Current value, then advance by `by`.
    fn advance(&mut self, source_type: &str, by: usize) -> usize {
        let count = self.counts.entry(source_type.to_string()).or_default();
        let current = *count;
        *count += by;
        current
    }
}

/// Outcome of converting one source regiment.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    Converted(Regiment),
    /// The source type has no entry in the mapping table.
    Unmapped,
    /// The source type is mapped to nothing on purpose.
    NotNeeded,
    /// Every destination for the source type is exclusive to other countries.
    Exhausted,
}

/// First entry usable by `tag`, scanning at most one full cycle from
/// `start`. Returns the entry and how many entries were skipped.
fn select_usable<'t>(
    list: &'t [MappedType],
    start: usize,
    tag: &str,
) -> Option<(&'t MappedType, usize)> {
    (0..list.len())
        .map(|skipped| (&list[(start + skipped) % list.len()], skipped))
        .find(|(mapped, _)| mapped.unit_type.is_usable_by(tag))
}

/// Convert one source regiment for country `tag`.
///
/// Advances `counters` for the source type by one, plus one for every
/// exclusive entry that had to be skipped.
pub fn convert_regiment(
    source: &SourceRegiment,
    table: &TypeMappingTable,
    counters: &mut TypeCounters,
    tag: &str,
) -> Conversion {
    let Some(list) = table.resolve(&source.type_name) else {
        log::debug!(
            "Regiment {} has unmapped unit type {}, dropping.",
            source.name,
            source.type_name
        );
        return Conversion::Unmapped;
    };
    if list.is_empty() {
        return Conversion::NotNeeded;
    }

    let start = counters.advance(&source.type_name, 1) % list.len();
    match select_usable(list, start, tag) {
        Some((mapped, skipped)) => {
            counters.advance(&source.type_name, skipped);
            Conversion::Converted(Regiment::new(&source.name, mapped))
        }
        None => {
            counters.advance(&source.type_name, list.len());
            log::warn!(
                "Regiment {} has unit type {}, but it is mapped only to units exclusive to other countries. Dropping.",
                source.name,
                source.type_name
            );
            Conversion::Exhausted
        }
    }
}
