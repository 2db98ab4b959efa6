//! RON config loader
//!
//! Loads progression settings from a RON file, with fallback to built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::ProgressionError;
use super::config::ProgressionConfig;

/// File name looked up in the user's config directory
pub const CONFIG_FILE_NAME: &str = "progression.ron";

/// Errors from reading or writing a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),

    #[error(transparent)]
    Invalid(#[from] ProgressionError),
}

/// Default config path, `<config dir>/progression.ron`
pub fn default_config_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "skillquest", "SkillQuest") {
        proj_dirs.config_dir().join(CONFIG_FILE_NAME)
    } else {
        PathBuf::from(".").join(CONFIG_FILE_NAME)
    }
}

/// Parse and validate config text
pub fn parse_config(content: &str, path: &Path) -> Result<ProgressionConfig, ConfigError> {
    let config: ProgressionConfig = ron::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Read a config file, failing on any problem
pub fn read_config(path: &Path) -> Result<ProgressionConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, path)
}

/// Load the config at `path` (or the default path), falling back to defaults
pub fn load_config(path: Option<&Path>) -> ProgressionConfig {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    if !path.exists() {
        log::debug!("No config at {:?}, using defaults", path);
        return ProgressionConfig::default();
    }

    match read_config(&path) {
        Ok(config) => {
            log::info!("Progression config loaded from {:?}", path);
            config
        }
        Err(e) => {
            log::warn!("{}, using defaults", e);
            ProgressionConfig::default()
        }
    }
}

/// Resolve the config the way a caller asked for it
///
/// An explicitly named file must load cleanly. Only the implicit default
/// location falls back to built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ProgressionConfig, ConfigError> {
    match explicit {
        Some(path) => {
            let config = read_config(path)?;
            log::info!("Progression config loaded from {:?}", path);
            Ok(config)
        }
        None => Ok(load_config(None)),
    }
}

/// Write the default settings as RON for easy editing
pub fn export_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let text = ron::ser::to_string_pretty(&ProgressionConfig::default(), ron::ser::PrettyConfig::default())?;
    fs::write(path, text).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Default progression config written to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::{LevelCurve, TierThresholds};

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("skillquest-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_export_then_read_default_config() {
        let path = scratch_path("exported.ron");
        let result = export_default_config(&path);
        assert!(result.is_ok(), "Failed to export default config: {:?}", result.err());

        let config = read_config(&path).expect("exported config should load");
        assert_eq!(config, ProgressionConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse_config("(stat_xp_unit: 10)", Path::new("inline")).unwrap();
        assert_eq!(config.stat_xp_unit, 10);
        assert_eq!(config.curve, LevelCurve::STANDARD);
        assert_eq!(config.tiers, TierThresholds::default());
    }

    #[test]
    fn test_full_config() {
        let text = r#"(
            curve: (base_xp: 200, growth_numerator: 3, growth_denominator: 2),
            tiers: (thresholds: [10, 100, 1000]),
            architect: (min_titles: 2),
            stat_xp_unit: 50,
        )"#;
        let config = parse_config(text, Path::new("inline")).unwrap();
        assert_eq!(config.curve.xp_for_level(2), Ok(300));
        assert_eq!(config.tiers.max_tier(), 3);
        assert_eq!(config.architect.min_titles(), 2);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_curve = "(curve: (base_xp: 0, growth_numerator: 6, growth_denominator: 5))";
        assert!(matches!(
            parse_config(bad_curve, Path::new("inline")),
            Err(ConfigError::Parse { .. })
        ));

        let bad_tiers = "(tiers: (thresholds: [500, 100]))";
        assert!(parse_config(bad_tiers, Path::new("inline")).is_err());

        let bad_unit = "(stat_xp_unit: 0)";
        assert!(matches!(
            parse_config(bad_unit, Path::new("inline")),
            Err(ConfigError::Invalid(ProgressionError::Configuration(_)))
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = load_config(Some(scratch_path("does-not-exist.ron").as_path()));
        assert_eq!(config, ProgressionConfig::default());
    }

    #[test]
    fn test_load_broken_file_falls_back() {
        let path = scratch_path("broken.ron");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "(curve: oops").unwrap();
        assert_eq!(load_config(Some(path.as_path())), ProgressionConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_explicit_invalid_config_is_an_error() {
        let path = scratch_path("explicit-bad-tiers.ron");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "(tiers: (thresholds: [500, 100]))").unwrap();

        let result = resolve_config(Some(path.as_path()));
        assert!(matches!(result, Err(ConfigError::Parse { .. })), "got {:?}", result);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let result = resolve_config(Some(scratch_path("explicit-missing.ron").as_path()));
        assert!(matches!(result, Err(ConfigError::Io { .. })), "got {:?}", result);
    }

    #[test]
    fn test_explicit_valid_config_loads() {
        let path = scratch_path("explicit-good.ron");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "(stat_xp_unit: 40)").unwrap();

        let config = resolve_config(Some(path.as_path())).unwrap();
        assert_eq!(config.stat_xp_unit, 40);
        let _ = fs::remove_file(&path);
    }
}
