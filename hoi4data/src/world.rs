use crate::adjacency::AdjacencyGraph;
use crate::error::DataError;
use crate::location::LocationMapping;
use crate::provinces::{Provinces, Tag};
use crate::source::SourceFormation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Everything the army conversion needs from the rest of the converter,
/// exported as one JSON document by the province and country import.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub provinces: Provinces,
    #[serde(default)]
    pub adjacency: AdjacencyGraph,
    #[serde(default)]
    pub location_mapping: LocationMapping,
    /// Source formations per destination country tag.
    #[serde(default)]
    pub countries: BTreeMap<Tag, Vec<SourceFormation>>,
}

impl WorldSnapshot {
    pub fn load_json(path: &Path) -> Result<Self, DataError> {
        let reader = BufReader::new(File::open(path)?);
        let world: WorldSnapshot = serde_json::from_reader(reader)?;
        log::info!(
            "Loaded world snapshot: {} provinces, {} adjacency entries, {} mapped source provinces, {} countries",
            world.provinces.len(),
            world.adjacency.province_count(),
            world.location_mapping.len(),
            world.countries.len()
        );
        Ok(world)
    }
}
