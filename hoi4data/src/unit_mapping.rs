//! Source unit type -> destination unit types.
//!
//! The ruleset file holds one block per rule set. `default` is always
//! present in shipped files; mods whose units differ get their own set,
//! keyed by the mod's identifier:
//!
//! ```text
//! default = {
//!     link = { vic = infantry hoi0 = infantry_brigade }
//!     # 3:1 ratio of militia to infantry
//!     link = { vic = irregular hoi0 = militia_brigade hoi0 = militia_brigade
//!              hoi0 = militia_brigade hoi1 = infantry_brigade }
//!     # deliberately converted to nothing
//!     link = { vic = engineer }
//! }
//! ```
//!
//! Destination keys `hoi0` to `hoi4` carry the model tier; `HoI4` is an
//! older spelling of tier 3. Repeating a destination makes it more likely
//! to be chosen, since lists are consumed round-robin.

use crate::error::DataError;
use crate::unit_types::{UnitType, UnitTypeCatalog};
use pdxtxt::{DefaultPdxTxt, PdxNode, PdxTxt};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Historical model tier of a destination unit, 0 (oldest) to 4.
pub type ModelTier = u8;

const DEFAULT_RULE_SET: &str = "default";

/// One weighted slot in a source type's destination list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedType {
    pub unit_type: UnitType,
    pub tier: ModelTier,
}

/// The selected rule set, ready for lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMappingTable {
    rule_set: String,
    mappings: HashMap<String, Vec<MappedType>>,
}

fn tier_for_key(key: &str) -> Option<ModelTier> {
    match key {
        "hoi0" => Some(0),
        "hoi1" => Some(1),
        "hoi2" => Some(2),
        "hoi3" | "HoI4" => Some(3),
        "hoi4" => Some(4),
        _ => None,
    }
}

impl TypeMappingTable {
    /// Load the ruleset file and select a rule set.
    ///
    /// `mod_id` picks a named set when the file has one; otherwise the
    /// `default` set is used (or the first set, if there is no `default`).
    /// A missing, unreadable or empty file is an error.
    pub fn load(
        path: &Path,
        catalog: &UnitTypeCatalog,
        mod_id: Option<&str>,
    ) -> Result<Self, DataError> {
        let ast = DefaultPdxTxt::parse_file(path).map_err(|source| DataError::Script {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_node(&ast, catalog, mod_id)
            .ok_or_else(|| DataError::NoRuleSets(path.to_path_buf()))?;
        log::info!(
            "Using unit mapping rule set '{}' with {} source types from {:?}",
            table.rule_set,
            table.mappings.len(),
            path
        );
        Ok(table)
    }

    /// Build from a parsed ruleset. `None` when the file has no rule sets.
    pub fn from_node(
        ast: &PdxNode,
        catalog: &UnitTypeCatalog,
        mod_id: Option<&str>,
    ) -> Option<Self> {
        let rule_sets: Vec<(String, &PdxNode)> = ast
            .assignments()
            .filter(|(_, body)| body.is_block())
            .filter_map(|(key, body)| Some((key.scalar()?, body)))
            .collect();

        let (name, body) = mod_id
            .and_then(|m| rule_sets.iter().find(|(key, _)| key == m))
            .or_else(|| rule_sets.iter().find(|(key, _)| key == DEFAULT_RULE_SET))
            .or_else(|| rule_sets.first())?;

        let mut mappings: HashMap<String, Vec<MappedType>> = HashMap::new();
        for link in body.values_of("link") {
            let sources: Vec<String> = link.values_of("vic").filter_map(|v| v.scalar()).collect();
            if sources.is_empty() {
                log::error!("Invalid unit mapping (no source) in rule set '{}'", name);
                continue;
            }

            let mut targets = Vec::new();
            let mut named_targets = 0;
            for (key, value) in link.assignments() {
                let Some(tier) = key.scalar().as_deref().and_then(tier_for_key) else {
                    continue;
                };
                named_targets += 1;
                let Some(type_name) = value.scalar() else {
                    continue;
                };
                match catalog.get(&type_name) {
                    Some(unit_type) => targets.push(MappedType {
                        unit_type: unit_type.clone(),
                        tier,
                    }),
                    None => log::warn!(
                        "Unit mapping for {:?} names unknown unit type {}, skipping it",
                        sources,
                        type_name
                    ),
                }
            }

            // A link whose destinations all failed to resolve is not a
            // deliberate "no destination"; its sources stay unmapped.
            if named_targets > 0 && targets.is_empty() {
                log::warn!(
                    "Unit mapping for {:?} has no known destination types, leaving it unmapped",
                    sources
                );
                continue;
            }

            for source in sources {
                mappings
                    .entry(source)
                    .or_default()
                    .extend(targets.iter().cloned());
            }
        }

        Some(Self {
            rule_set: name.clone(),
            mappings,
        })
    }

    /// Destination list for a source type.
    ///
    /// `None`: the type is unmapped. `Some(&[])`: mapped to nothing on
    /// purpose.
    pub fn resolve(&self, source_type: &str) -> Option<&[MappedType]> {
        self.mappings.get(source_type).map(Vec::as_slice)
    }

    pub fn rule_set(&self) -> &str {
        &self.rule_set
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
