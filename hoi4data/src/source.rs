//! Source-game military formations, as extracted from the save by the
//! country import.

use serde::{Deserialize, Serialize};

/// One source regiment or ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRegiment {
    pub name: String,
    /// Source unit type, e.g. `infantry` or `ironclad`.
    #[serde(rename = "type")]
    pub type_name: String,
}

impl SourceRegiment {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
        }
    }
}

/// An army or navy in the source save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFormation {
    pub name: String,
    #[serde(default)]
    pub navy: bool,
    /// Source province the formation is declared at.
    pub location: u32,
    /// Navy already in open water with no home port.
    #[serde(default)]
    pub at_sea: bool,
    #[serde(default)]
    pub regiments: Vec<SourceRegiment>,
}

impl SourceFormation {
    pub fn army(name: &str, location: u32, regiments: Vec<SourceRegiment>) -> Self {
        Self {
            name: name.to_string(),
            navy: false,
            location,
            at_sea: false,
            regiments,
        }
    }

    pub fn navy(name: &str, location: u32, at_sea: bool, regiments: Vec<SourceRegiment>) -> Self {
        Self {
            name: name.to_string(),
            navy: true,
            location,
            at_sea,
            regiments,
        }
    }
}
