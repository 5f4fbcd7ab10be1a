//! Built-in lane defaults (layer 1)
//!
//! Hardcoded defaults for all configuration values.

use serde::{Deserialize, Serialize};

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// CMake executable (default: "cmake")
    pub cmake: String,

    /// CMake generator (default: "Ninja")
    pub generator: String,

    /// Source directory (default: ".")
    pub source_dir: String,

    /// Build directory (default: "twister-out")
    pub build_dir: String,

    /// Handler readiness (default: false)
    pub handler_ready: bool,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            cmake: "cmake".to_string(),
            generator: "Ninja".to_string(),
            source_dir: ".".to_string(),
            build_dir: "twister-out".to_string(),
            handler_ready: false,
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cmake": self.cmake,
            "generator": self.generator,
            "source_dir": self.source_dir,
            "build_dir": self.build_dir,
            "extra_args": [],
            "extra_conf_files": [],
            "extra_overlay_confs": [],
            "extra_dtc_overlay_files": [],
            "extra_configs": [],
            "cmake_extra_args": [],
            "handler": {
                "args": [],
                "ready": self.handler_ready
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let defaults = BuiltinDefaults::default();
        assert_eq!(defaults.cmake, "cmake");
        assert_eq!(defaults.generator, "Ninja");
        assert_eq!(defaults.source_dir, ".");
        assert_eq!(defaults.build_dir, "twister-out");
        assert!(!defaults.handler_ready);
    }

    #[test]
    fn test_to_value() {
        let defaults = BuiltinDefaults::default();
        let value = defaults.to_value();

        assert_eq!(value["generator"], "Ninja");
        assert_eq!(value["handler"]["ready"], false);
        assert!(value["extra_conf_files"].as_array().unwrap().is_empty());
    }
}
