//! Engine and CLI settings.
//!
//! Settings live in a JSON file. An explicitly requested file must exist; the
//! default location (`<config dir>/descry/config.json`) is optional and falls
//! back to [`EngineConfig::default`].

use crate::error::{DescryError, Result, ResultExt as _};
use crate::stats::{CorrelationMethod, SkewnessKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Rows shown by `peek` when no count is given
    pub peek_rows: usize,
    pub skewness: SkewnessKind,
    pub correlation: CorrelationMethod,
    /// Decimal places used when rendering statistics
    pub precision: usize,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            peek_rows: 6,
            skewness: SkewnessKind::default(),
            correlation: CorrelationMethod::default(),
            precision: 4,
            log_level: "info".to_owned(),
        }
    }
}

impl EngineConfig {
    /// # Errors
    ///
    /// Returns [`DescryError::Config`] when precision is too low to tell
    /// correlation or skewness values apart at the 1e-4 level.
    pub fn validate(&self) -> Result<()> {
        if self.precision < 4 {
            return Err(DescryError::Config(format!(
                "precision must be at least 4 decimal places, got {}",
                self.precision
            )));
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("descry").join("config.json"))
}

/// Loads settings from `path`, or from the default location if `path` is `None`.
///
/// # Errors
///
/// Fails if an explicit `path` cannot be read, or if any config file that is
/// read fails to parse or validate.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => {
                tracing::debug!("No config file found, using defaults");
                return Ok(EngineConfig::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&content)?;
    config.validate()?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// # Errors
///
/// Fails if the parent directory cannot be created or the file cannot be written.
pub fn save_config(config: &EngineConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("config.json");
        let config = EngineConfig {
            peek_rows: 10,
            skewness: SkewnessKind::Type2,
            correlation: CorrelationMethod::Spearman,
            precision: 6,
            log_level: "debug".to_owned(),
        };
        save_config(&config, &path)?;
        assert_eq!(load_config(Some(&path))?, config);
        Ok(())
    }

    #[test]
    fn test_missing_fields_use_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "skewness": "type1" }"#)?;
        let config = load_config(Some(&path))?;
        assert_eq!(config.skewness, SkewnessKind::Type1);
        assert_eq!(config.peek_rows, 6);
        assert_eq!(config.correlation, CorrelationMethod::Pearson);
        Ok(())
    }

    #[test]
    fn test_unknown_field_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "peek": 3 }"#)?;
        assert!(matches!(
            load_config(Some(&path)),
            Err(DescryError::Config(_))
        ));
        Ok(())
    }

    #[test]
    fn test_low_precision_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "precision": 2 }"#)?;
        assert!(load_config(Some(&path)).is_err());
        Ok(())
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = load_config(Some(Path::new("/definitely/not/here.json")));
        assert!(result.is_err());
    }
}
