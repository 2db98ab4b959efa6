//! Progression settings and config file loading
//!
//! Settings come from an optional RON file so curve and tier tuning
//! does not require a rebuild.

pub mod config;
pub mod loader;

pub use config::{ProgressionConfig, DEFAULT_STAT_XP_UNIT};
pub use loader::{
    ConfigError, CONFIG_FILE_NAME,
    default_config_path, parse_config, read_config, load_config, resolve_config, export_default_config,
};
