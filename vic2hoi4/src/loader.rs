use anyhow::{Context, Result};
use hoi4army::ConverterConfig;
use hoi4data::adjacency::load_adjacencies_csv;
use hoi4data::{TypeMappingTable, UnitTypeCatalog, WorldSnapshot};
use std::path::Path;

/// Configuration file, or defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<ConverterConfig> {
    match path {
        Some(path) => ConverterConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path)),
        None => {
            log::info!("No configuration file given, using defaults");
            Ok(ConverterConfig::default())
        }
    }
}

pub fn load_mapping_table(
    units: &Path,
    mapping: &Path,
    config: &ConverterConfig,
) -> Result<TypeMappingTable> {
    let catalog = UnitTypeCatalog::load(units)
        .with_context(|| format!("Failed to load unit types from {:?}", units))?;
    TypeMappingTable::load(mapping, &catalog, config.mod_id())
        .with_context(|| format!("Failed to load unit mappings from {:?}", mapping))
}

/// World snapshot, with its adjacency replaced by `adjacencies` if given.
pub fn load_world(world: &Path, adjacencies: Option<&Path>) -> Result<WorldSnapshot> {
    let mut snapshot = WorldSnapshot::load_json(world)
        .with_context(|| format!("Failed to load world snapshot from {:?}", world))?;
    if let Some(path) = adjacencies {
        snapshot.adjacency = load_adjacencies_csv(path)
            .with_context(|| format!("Failed to load adjacencies from {:?}", path))?;
    }
    Ok(snapshot)
}
