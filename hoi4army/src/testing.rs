//! Fixtures for tests in this crate and its dependents.

use crate::regiment::Regiment;
use hoi4data::{
    AdjacencyGraph, ForceType, LocationMapping, MappedType, Province, ProvinceId, Provinces,
    TypeMappingTable, UnitType, UnitTypeCatalog,
};
use pdxtxt::{DefaultPdxTxt, PdxTxt};

/// Provinces, adjacency and location mapping for one test scenario.
#[derive(Debug, Clone, Default)]
pub struct TestMap {
    pub provinces: Provinces,
    pub adjacency: AdjacencyGraph,
    pub locations: LocationMapping,
}

pub struct MapBuilder {
    map: TestMap,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self {
            map: TestMap::default(),
        }
    }

    /// Land province without bases.
    pub fn land(mut self, id: ProvinceId, owner: &str) -> Self {
        self.map.provinces.insert(id, Province::land(Some(owner)));
        self
    }

    pub fn port(mut self, id: ProvinceId, owner: &str, naval_base: u32) -> Self {
        let mut province = Province::land(Some(owner));
        province.naval_base = naval_base;
        self.map.provinces.insert(id, province);
        self
    }

    pub fn air_base(mut self, id: ProvinceId, owner: &str, air_base: u32) -> Self {
        let mut province = Province::land(Some(owner));
        province.air_base = air_base;
        self.map.provinces.insert(id, province);
        self
    }

    /// Bidirectional edge. Ids not added as provinces count as sea.
    pub fn adjacent(mut self, a: ProvinceId, b: ProvinceId) -> Self {
        self.map.adjacency.add_adjacency(a, b);
        self
    }

    pub fn map_location(mut self, source: u32, candidates: &[ProvinceId]) -> Self {
        self.map.locations.insert(source, candidates.to_vec());
        self
    }

    pub fn build(self) -> TestMap {
        self.map
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Every unit type the force organizer knows about, plus a few ships and
/// planes. `imperial_guard_brigade` is exclusive to `JAP`.
pub fn standard_catalog() -> UnitTypeCatalog {
    let mut catalog = UnitTypeCatalog::new();
    let land = [
        ("infantry_brigade", "infantry_practical"),
        ("militia_brigade", "militia_practical"),
        ("cavalry_brigade", "cavalry_practical"),
        ("engineer_brigade", "engineering_practical"),
        ("artillery_brigade", "artillery_practical"),
        ("anti_air_brigade", "artillery_practical"),
        ("anti_tank_brigade", "artillery_practical"),
        ("light_armor_brigade", "armour_practical"),
        ("armor_brigade", "armour_practical"),
        ("armored_car_brigade", "armour_practical"),
        ("tank_destroyer_brigade", "armour_practical"),
        ("motorized_brigade", "mobile_practical"),
        ("bergsjaeger_brigade", "mountain_practical"),
        ("marine_brigade", "marine_practical"),
        ("police_brigade", "militia_practical"),
    ];
    for (name, practical) in land {
        catalog.insert(UnitType::new(name, ForceType::Land, practical, 1.0));
    }
    catalog.insert(
        UnitType::new("imperial_guard_brigade", ForceType::Land, "infantry_practical", 1.5)
            .exclusive_to(&["JAP"]),
    );
    catalog.insert(UnitType::new("fighter", ForceType::Air, "fighter_practical", 1.0));
    catalog.insert(UnitType::new(
        "tactical_bomber",
        ForceType::Air,
        "tactical_practical",
        1.0,
    ));
    catalog.insert(UnitType::new("destroyer", ForceType::Navy, "destroyer_practical", 1.0));
    catalog.insert(UnitType::new(
        "battleship",
        ForceType::Navy,
        "capitalship_practical",
        2.0,
    ));
    catalog
}

/// Build a mapping table from script text.
///
/// # Panics
///
/// If the script does not parse or holds no rule sets.
pub fn mapping_table(script: &str, catalog: &UnitTypeCatalog) -> TypeMappingTable {
    let ast = DefaultPdxTxt::parse(DefaultPdxTxt::tokenize(script))
        .unwrap_or_else(|e| panic!("bad mapping script: {}", e));
    TypeMappingTable::from_node(&ast, catalog, None)
        .unwrap_or_else(|| panic!("mapping script has no rule sets"))
}

/// Converted tier 0 regiments of the given destination types, named after
/// their position.
///
/// # Panics
///
/// If a type is not in `catalog`.
pub fn regiments(catalog: &UnitTypeCatalog, types: &[&str]) -> Vec<Regiment> {
    types
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let unit_type = catalog
                .get(name)
                .unwrap_or_else(|| panic!("unknown unit type {}", name))
                .clone();
            Regiment::new(&format!("Regiment {}", i + 1), &MappedType { unit_type, tier: 0 })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let map = MapBuilder::new()
            .land(1, "GER")
            .port(2, "GER", 3)
            .adjacent(1, 2)
            .map_location(10, &[1])
            .build();
        assert_eq!(map.provinces.len(), 2);
        assert!(map.provinces.get(2).unwrap().has_naval_base());
        assert_eq!(map.adjacency.neighbors(2), &[1]);
        assert_eq!(map.locations.candidates(10), &[1]);
    }

    #[test]
    fn test_regiments_fixture() {
        let regs = regiments(&standard_catalog(), &["fighter", "destroyer"]);
        assert_eq!(regs[0].name, "Regiment 1");
        assert_eq!(regs[0].domain(), ForceType::Air);
        assert_eq!(regs[1].domain(), ForceType::Navy);
    }
}
