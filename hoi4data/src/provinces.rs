use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ProvinceId = u32;

/// Country tag, e.g. `GER`.
pub type Tag = String;

/// Highest air base level a province can be asked to hold.
pub const MAX_AIR_BASE: u32 = 10;

/// A destination province as imported by the province subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Province {
    /// Owning country, if any.
    #[serde(default)]
    pub owner: Option<Tag>,
    /// Land province (as opposed to a coastal sea tile imported as a province).
    #[serde(default = "default_true")]
    pub is_land: bool,
    #[serde(default)]
    pub naval_base: u32,
    #[serde(default)]
    pub air_base: u32,
    /// Air base level the converted air forces need here.
    #[serde(default)]
    pub required_air_base: u32,
}

fn default_true() -> bool {
    true
}

impl Province {
    pub fn land(owner: Option<&str>) -> Self {
        Self {
            owner: owner.map(str::to_string),
            is_land: true,
            naval_base: 0,
            air_base: 0,
            required_air_base: 0,
        }
    }

    pub fn has_naval_base(&self) -> bool {
        self.naval_base > 0
    }

    pub fn is_owned_by(&self, tag: &str) -> bool {
        self.owner.as_deref() == Some(tag)
    }

    /// Raise the required air base level; never lowers an earlier requirement.
    pub fn require_air_base(&mut self, level: u32) {
        self.required_air_base = self.required_air_base.max(level.min(MAX_AIR_BASE));
    }
}

/// All imported destination provinces, keyed by id.
///
/// Ids that appear in the adjacency graph but not here are sea zones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Provinces {
    provinces: BTreeMap<ProvinceId, Province>,
}

impl Provinces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ProvinceId, province: Province) {
        self.provinces.insert(id, province);
    }

    pub fn get(&self, id: ProvinceId) -> Option<&Province> {
        self.provinces.get(&id)
    }

    pub fn get_mut(&mut self, id: ProvinceId) -> Option<&mut Province> {
        self.provinces.get_mut(&id)
    }

    pub fn contains(&self, id: ProvinceId) -> bool {
        self.provinces.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.provinces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.provinces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProvinceId, &Province)> {
        self.provinces.iter().map(|(&id, p)| (id, p))
    }
}

impl FromIterator<(ProvinceId, Province)> for Provinces {
    fn from_iter<I: IntoIterator<Item = (ProvinceId, Province)>>(iter: I) -> Self {
        Self {
            provinces: iter.into_iter().collect(),
        }
    }
}
