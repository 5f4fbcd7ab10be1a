//! Effective configuration with full provenance
//!
//! The effective config captures the merged configuration plus
//! information about where each value came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use twister_cmake::{AssembleRequest, HandlerArgs};


use super::defaults::BuiltinDefaults;
use super::merge::merge_layers;

/// Schema version for effective_config
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "twister-lane/effective_config@1";

/// Repo config location, relative to the working directory
pub const REPO_CONFIG_PATH: &str = ".twister/lane.toml";

/// Host config location, relative to `$HOME`
pub const HOST_CONFIG_PATH: &str = ".config/twister/lane.toml";

/// Origin of a configuration layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    Host,
    Repo,
    Cli,
}

/// One layer that fed the merge; files carry their path and SHA-256
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl ConfigSource {
    fn inline(origin: ConfigOrigin) -> Self {
        Self {
            origin,
            path: None,
            digest: None,
        }
    }

    /// Read a TOML layer, recording where it came from
    fn load(origin: ConfigOrigin, path: &Path) -> Result<(Value, Self), ConfigError> {
        let bytes = fs::read(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let digest = hex::encode(Sha256::digest(&bytes));

        let text = std::str::from_utf8(&bytes)
            .map_err(|e| ConfigError::ParseError(format!("{}: invalid UTF-8: {}", path.display(), e)))?;
        let table: toml::Table = toml::from_str(text)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        let value = serde_json::to_value(table)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        info!(origin = ?origin, path = %path.display(), "loaded config layer");
        let source = Self {
            origin,
            path: Some(path.to_string_lossy().to_string()),
            digest: Some(digest),
        };
        Ok((value, source))
    }
}

/// Typed view of the merged configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneSettings {
    pub cmake: String,
    pub generator: String,
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    #[serde(default)]
    pub extra_args: Vec<String>,
    #[serde(default)]
    pub extra_conf_files: Vec<String>,
    #[serde(default)]
    pub extra_overlay_confs: Vec<String>,
    #[serde(default)]
    pub extra_dtc_overlay_files: Vec<String>,
    /// `CONFIG_*` lines for the per-suite extra fragment
    #[serde(default)]
    pub extra_configs: Vec<String>,
    #[serde(default)]
    pub cmake_extra_args: Vec<String>,
    #[serde(default)]
    pub handler: HandlerArgs,
}

impl LaneSettings {
    /// Assembly inputs described by these settings
    pub fn to_request(&self) -> AssembleRequest {
        AssembleRequest {
            extra_args: self.extra_args.clone(),
            handler: self.handler.clone(),
            extra_conf_files: self.extra_conf_files.clone(),
            extra_overlay_confs: self.extra_overlay_confs.clone(),
            extra_dtc_overlay_files: self.extra_dtc_overlay_files.clone(),
            cmake_extra_args: self.cmake_extra_args.clone(),
            build_dir: self.build_dir.clone(),
        }
    }
}

/// Merged lane settings and the layers that produced them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub schema_version: u32,
    pub schema_id: String,
    pub created_at: DateTime<Utc>,
    /// Layers in precedence order, lowest first
    pub sources: Vec<ConfigSource>,
    settings: LaneSettings,
}

impl EffectiveConfig {
    /// Merge builtin defaults, host file, repo file and CLI overrides.
    ///
    /// Missing files are skipped. The merged value must deserialize into
    /// [`LaneSettings`] with a non-empty `cmake` and `generator`.
    pub fn build(
        host_config_path: Option<&Path>,
        repo_config_path: Option<&Path>,
        cli_overrides: Option<Value>,
    ) -> Result<Self, ConfigError> {
        let mut layers = vec![BuiltinDefaults::default().to_value()];
        let mut sources = vec![ConfigSource::inline(ConfigOrigin::Builtin)];

        let files = [
            (ConfigOrigin::Host, host_config_path),
            (ConfigOrigin::Repo, repo_config_path),
        ];
        for (origin, path) in files {
            if let Some(path) = path.filter(|p| p.exists()) {
                let (value, source) = ConfigSource::load(origin, path)?;
                layers.push(value);
                sources.push(source);
            }
        }

        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(ConfigSource::inline(ConfigOrigin::Cli));
        }

        let settings = Self::validate(merge_layers(layers))?;
        debug!(layers = sources.len(), build_dir = %settings.build_dir.display(), "merged config");

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            sources,
            settings,
        })
    }

    fn validate(merged: Value) -> Result<LaneSettings, ConfigError> {
        let settings: LaneSettings = serde_json::from_value(merged)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        for (name, value) in [("cmake", &settings.cmake), ("generator", &settings.generator)] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must not be empty",
                    name
                )));
            }
        }
        Ok(settings)
    }

    /// Default host config path (`$HOME/.config/twister/lane.toml`)
    pub fn default_host_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(HOST_CONFIG_PATH))
    }

    /// Default repo config path (`.twister/lane.toml`)
    pub fn default_repo_path() -> PathBuf {
        PathBuf::from(REPO_CONFIG_PATH)
    }

    pub fn settings(&self) -> &LaneSettings {
        &self.settings
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(lines: &[&str]) -> NamedTempFile {
        let mut temp = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(temp, "{}", line).unwrap();
        }
        temp
    }

    #[test]
    fn test_build_with_defaults_only() {
        let config = EffectiveConfig::build(None, None, None).unwrap();
        let settings = config.settings();

        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert_eq!(settings.generator, "Ninja");
        assert_eq!(settings.build_dir, PathBuf::from("twister-out"));
        assert!(!settings.handler.ready);
        assert!(settings.extra_args.is_empty());
    }

    #[test]
    fn test_build_with_cli_override() {
        let cli = serde_json::json!({
            "build_dir": "/tmp/out",
            "extra_conf_files": ["c.conf"]
        });

        let config = EffectiveConfig::build(None, None, Some(cli)).unwrap();

        assert_eq!(config.settings().build_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.settings().extra_conf_files, vec!["c.conf".to_string()]);
        assert_eq!(config.sources.last().map(|s| &s.origin), Some(&ConfigOrigin::Cli));
    }

    #[test]
    fn test_validation_empty_generator() {
        let cli = serde_json::json!({ "generator": "  " });

        let result = EffectiveConfig::build(None, None, Some(cli));
        assert!(result.unwrap_err().to_string().contains("generator"));
    }

    #[test]
    fn test_validation_list_of_strings() {
        let cli = serde_json::json!({ "extra_conf_files": [1, 2] });

        let result = EffectiveConfig::build(None, None, Some(cli));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_load_toml_file() {
        let host = toml_file(&[
            "generator = \"Unix Makefiles\"",
            "extra_overlay_confs = [\"overlay-usb.conf\"]",
            "[handler]",
            "args = [\"QEMU_PIPE=/tmp/qemu-fifo\"]",
            "ready = true",
        ]);

        let config = EffectiveConfig::build(Some(host.path()), None, None).unwrap();
        let request = config.settings().to_request();

        assert_eq!(config.settings().generator, "Unix Makefiles");
        assert_eq!(request.extra_overlay_confs, vec!["overlay-usb.conf".to_string()]);
        assert!(request.handler.ready);
        assert_eq!(request.handler.args, vec!["QEMU_PIPE=/tmp/qemu-fifo".to_string()]);
    }

    #[test]
    fn test_repo_overrides_host() {
        let host = toml_file(&[
            "generator = \"Unix Makefiles\"",
            "extra_conf_files = [\"host.conf\"]",
        ]);
        let repo = toml_file(&["extra_conf_files = [\"repo.conf\"]"]);

        let config =
            EffectiveConfig::build(Some(host.path()), Some(repo.path()), None).unwrap();

        assert_eq!(config.settings().generator, "Unix Makefiles");
        assert_eq!(config.settings().extra_conf_files, vec!["repo.conf".to_string()]);
        assert_eq!(config.sources.len(), 3);
        assert_eq!(config.sources[2].origin, ConfigOrigin::Repo);
        assert_eq!(config.sources[2].digest.as_ref().map(|d| d.len()), Some(64));
    }

    #[test]
    fn test_missing_file_skipped() {
        let config =
            EffectiveConfig::build(Some(Path::new("/nonexistent/lane.toml")), None, None)
                .unwrap();

        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].origin, ConfigOrigin::Builtin);
    }

    #[test]
    fn test_invalid_toml() {
        let repo = toml_file(&["generator = "]);

        let result = EffectiveConfig::build(None, Some(repo.path()), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_json_carries_settings() {
        let config = EffectiveConfig::build(None, None, None).unwrap();
        let json = config.to_json().unwrap();

        assert!(json.contains("\"schema_id\": \"twister-lane/effective_config@1\""));
        assert!(json.contains("\"generator\": \"Ninja\""));
        assert!(json.contains("\"origin\": \"builtin\""));
    }
}
