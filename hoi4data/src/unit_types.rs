use crate::error::DataError;
use pdxtxt::{DefaultPdxTxt, PdxNode, PdxTxt, from_node};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Which branch of the armed forces a unit or force group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForceType {
    Land,
    Navy,
    Air,
}

/// A destination unit type (brigade, ship class, air wing).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitType {
    pub name: String,
    pub domain: ForceType,
    /// Practical (skill) category credited when a regiment of this type is
    /// converted.
    pub practical: String,
    pub practical_factor: f64,
    /// Countries allowed to field this type. Empty means everyone.
    pub usable_by: BTreeSet<String>,
}

impl UnitType {
    pub fn new(name: &str, domain: ForceType, practical: &str, practical_factor: f64) -> Self {
        Self {
            name: name.to_string(),
            domain,
            practical: practical.to_string(),
            practical_factor,
            usable_by: BTreeSet::new(),
        }
    }

    /// Restrict the type to the given countries.
    pub fn exclusive_to(mut self, tags: &[&str]) -> Self {
        self.usable_by = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn is_exclusive(&self) -> bool {
        !self.usable_by.is_empty()
    }

    pub fn is_usable_by(&self, tag: &str) -> bool {
        self.usable_by.is_empty() || self.usable_by.contains(tag)
    }
}

/// On-disk form of a unit type definition.
///
/// ```text
/// infantry_brigade = {
///     domain = land
///     practical = infantry_practical
///     practical_factor = 1.0
///     usable_by = { }
/// }
/// ```
#[derive(Debug, Deserialize)]
struct UnitTypeDef {
    domain: ForceType,
    practical: String,
    #[serde(default = "default_factor")]
    practical_factor: f64,
    #[serde(default)]
    usable_by: Vec<String>,
}

fn default_factor() -> f64 {
    1.0
}

/// All destination unit types, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitTypeCatalog {
    types: BTreeMap<String, UnitType>,
}

impl UnitTypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, unit_type: UnitType) {
        self.types.insert(unit_type.name.clone(), unit_type);
    }

    pub fn get(&self, name: &str) -> Option<&UnitType> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Load from a single script file or from every `.txt` file in a
    /// directory (in file-name order; later files override earlier ones).
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let files = if path.is_dir() {
            let mut files = std::fs::read_dir(path)?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<Result<Vec<PathBuf>, _>>()?;
            files.retain(|p| p.extension().is_some_and(|ext| ext == "txt"));
            files.sort();
            files
        } else {
            vec![path.to_path_buf()]
        };

        let mut catalog = Self::new();
        for file in &files {
            let ast = DefaultPdxTxt::parse_file(file).map_err(|source| DataError::Script {
                path: file.clone(),
                source,
            })?;
            catalog.extend_from_node(&ast, file)?;
        }

        let exclusive = catalog.types.values().filter(|t| t.is_exclusive()).count();
        log::info!(
            "Loaded {} unit types ({} country-exclusive) from {} file(s) under {:?}",
            catalog.len(),
            exclusive,
            files.len(),
            path
        );
        Ok(catalog)
    }

    fn extend_from_node(&mut self, ast: &PdxNode, path: &Path) -> Result<(), DataError> {
        let defs: BTreeMap<String, UnitTypeDef> =
            from_node(ast).map_err(|e| DataError::Deserialize {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        for (name, def) in defs {
            self.insert(UnitType {
                name,
                domain: def.domain,
                practical: def.practical,
                practical_factor: def.practical_factor,
                usable_by: def.usable_by.into_iter().collect(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_usability() {
        let open = UnitType::new("infantry_brigade", ForceType::Land, "infantry_practical", 1.0);
        assert!(open.is_usable_by("GER"));
        assert!(!open.is_exclusive());

        let exclusive = open.clone().exclusive_to(&["JAP"]);
        assert!(exclusive.is_exclusive());
        assert!(exclusive.is_usable_by("JAP"));
        assert!(!exclusive.is_usable_by("GER"));
    }

    #[test]
    fn test_load_directory_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = std::fs::File::create(dir.path().join("00_land.txt")).unwrap();
        write!(
            a,
            r#"
            infantry_brigade = {{ domain = land practical = infantry_practical }}
            cavalry_brigade = {{ domain = land practical = infantry_practical practical_factor = 0.5 }}
            "#
        )
        .unwrap();
        let mut b = std::fs::File::create(dir.path().join("01_special.txt")).unwrap();
        write!(
            b,
            r#"
            # overrides the earlier definition
            cavalry_brigade = {{ domain = land practical = cavalry_practical }}
            imperial_guard = {{ domain = land practical = infantry_practical usable_by = {{ JAP }} }}
            "#
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.md"), "not a unit file").unwrap();

        let catalog = UnitTypeCatalog::load(dir.path()).unwrap();
        assert_eq!(catalog.len(), 3);
        let cav = catalog.get("cavalry_brigade").unwrap();
        assert_eq!(cav.practical, "cavalry_practical");
        assert_eq!(cav.practical_factor, 1.0);
        assert!(catalog.get("imperial_guard").unwrap().is_exclusive());
    }

    #[test]
    fn test_bad_domain_is_reported_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "zeppelin = {{ domain = sky practical = air_practical }}").unwrap();
        let err = UnitTypeCatalog::load(file.path()).unwrap_err();
        assert!(matches!(err, DataError::Deserialize { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = UnitTypeCatalog::load(Path::new("/nonexistent/units.txt")).unwrap_err();
        assert!(matches!(err, DataError::Script { .. }));
    }
}
