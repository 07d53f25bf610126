use crate::basing::{BasingStrategy, CandidatePicker};
use hoi4data::DataError;
use pdxtxt::{DefaultPdxTxt, PdxTxt, from_node};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Converter configuration.
///
/// Read from a script file such as:
///
/// ```text
/// practicals_scale = 0.5
/// mods = { HFM }
/// basing = seeded
/// seed = 1836
/// refund_queued_practicals = yes
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Multiplier on practicals earned per converted regiment.
    pub practicals_scale: f64,
    /// Source mods in use. The first one picks the unit mapping rule set.
    pub mods: Vec<String>,
    /// How a basing province is chosen among equal candidates.
    pub basing: BasingStrategy,
    /// Seed for [`BasingStrategy::Seeded`].
    pub seed: u64,
    /// Take back practicals earned by regiments left in the production
    /// queue, since the destination game awards them again on construction.
    pub refund_queued_practicals: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            practicals_scale: 1.0,
            mods: Vec::new(),
            basing: BasingStrategy::Random,
            seed: 0,
            refund_queued_practicals: false,
        }
    }
}

impl ConverterConfig {
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let ast = DefaultPdxTxt::parse_file(path).map_err(|source| DataError::Script {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ConverterConfig = from_node(&ast).map_err(|e| DataError::Deserialize {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        if !self.practicals_scale.is_finite() || self.practicals_scale < 0.0 {
            return Err(DataError::InvalidConfig(format!(
                "practicals_scale must be a non-negative number, got {}",
                self.practicals_scale
            )));
        }
        Ok(())
    }

    /// Mod whose rule set should be used, if any.
    pub fn mod_id(&self) -> Option<&str> {
        self.mods.first().map(String::as_str)
    }

    pub fn picker(&self) -> CandidatePicker {
        CandidatePicker::new(self.basing, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ConverterConfig::default();
        assert_eq!(config.practicals_scale, 1.0);
        assert_eq!(config.basing, BasingStrategy::Random);
        assert_eq!(config.mod_id(), None);
        assert!(!config.refund_queued_practicals);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "mods = {{ HFM PDM }}\nbasing = seeded\nseed = 1836\n").unwrap();
        let config = ConverterConfig::load(file.path()).unwrap();
        assert_eq!(config.mod_id(), Some("HFM"));
        assert_eq!(config.basing, BasingStrategy::Seeded);
        assert_eq!(config.seed, 1836);
        assert_eq!(config.practicals_scale, 1.0);
    }

    #[test]
    fn test_load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "practicals_scale = 0.5\nbasing = first\nrefund_queued_practicals = yes\n"
        )
        .unwrap();
        let config = ConverterConfig::load(file.path()).unwrap();
        assert_eq!(config.practicals_scale, 0.5);
        assert_eq!(config.basing, BasingStrategy::First);
        assert!(config.refund_queued_practicals);
    }

    #[test]
    fn test_negative_scale_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "practicals_scale = -2").unwrap();
        let err = ConverterConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, DataError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "basing = sometimes").unwrap();
        let err = ConverterConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, DataError::Deserialize { .. }));
    }
}
