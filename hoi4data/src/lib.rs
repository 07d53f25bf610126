//! Destination-side data for the army converter.
//!
//! Everything here is loaded once per run and read by the conversion
//! engine: the province map and its adjacency graph, the mapping from
//! source provinces to destination candidates, the unit-type catalog and
//! the unit-mapping ruleset. The per-country source formations arrive
//! through [`world::WorldSnapshot`].

pub mod adjacency;
pub mod error;
pub mod location;
pub mod provinces;
pub mod source;
pub mod unit_mapping;
pub mod unit_types;
pub mod world;

pub use adjacency::AdjacencyGraph;
pub use error::DataError;
pub use location::LocationMapping;
pub use provinces::{MAX_AIR_BASE, Province, ProvinceId, Provinces, Tag};
pub use source::{SourceFormation, SourceRegiment};
pub use unit_mapping::{MappedType, ModelTier, TypeMappingTable};
pub use unit_types::{ForceType, UnitType, UnitTypeCatalog};
pub use world::WorldSnapshot;
