//! Configuration merge system
//!
//! Implements the 4-layer configuration merge:
//! 1. Built-in lane defaults
//! 2. Host/user config (~/.config/twister/lane.toml)
//! 3. Repo config (.twister/lane.toml)
//! 4. CLI flags

mod defaults;
mod effective;
mod merge;

pub use defaults::BuiltinDefaults;
pub use effective::{
    ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig, LaneSettings, HOST_CONFIG_PATH,
    REPO_CONFIG_PATH,
};
pub use merge::{deep_merge, merge_layers};
