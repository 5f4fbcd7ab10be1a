//! CMake definition parsing.
//!
//! Splits `KEY=VALUE` arguments and identifies the keys whose values are
//! list-merged rather than passed through.

/// Prefix shared by Kconfig options passed on the CMake command line.
const KCONFIG_PREFIX: &str = "CONFIG_";

/// Keys whose values are merged across all argument sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MergeKey {
    /// `CONF_FILE`, `;`-separated Kconfig fragments.
    ConfFile,
    /// `DTC_OVERLAY_FILE`, `;`-separated devicetree overlays.
    DtcOverlayFile,
    /// `OVERLAY_CONFIG`, space-separated Kconfig overlays.
    OverlayConfig,
}

impl MergeKey {
    /// All merge keys in emission order.
    pub const ALL: [MergeKey; 3] = [
        MergeKey::ConfFile,
        MergeKey::DtcOverlayFile,
        MergeKey::OverlayConfig,
    ];

    /// The CMake variable name.
    pub fn name(self) -> &'static str {
        match self {
            MergeKey::ConfFile => "CONF_FILE",
            MergeKey::DtcOverlayFile => "DTC_OVERLAY_FILE",
            MergeKey::OverlayConfig => "OVERLAY_CONFIG",
        }
    }

    /// Separator used when joining the merged value.
    pub fn separator(self) -> &'static str {
        match self {
            MergeKey::ConfFile | MergeKey::DtcOverlayFile => ";",
            MergeKey::OverlayConfig => " ",
        }
    }

    /// Look up a merge key by CMake variable name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Split a raw value into its non-empty segments.
    pub fn split_value(self, value: &str) -> Vec<String> {
        let segments: Vec<&str> = match self {
            MergeKey::ConfFile | MergeKey::DtcOverlayFile => value.split(';').collect(),
            MergeKey::OverlayConfig => value.split_whitespace().collect(),
        };
        segments
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A single command-line definition, either `KEY=VALUE` or a bare flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition<'a> {
    /// `KEY=VALUE`, split at the first `=`.
    Pair { key: &'a str, value: &'a str },
    /// Anything without an `=`.
    Flag(&'a str),
}

impl<'a> Definition<'a> {
    /// Parse an argument. Never fails; unrecognised shapes become flags.
    pub fn parse(arg: &'a str) -> Self {
        match arg.split_once('=') {
            Some((key, value)) if !key.is_empty() => Definition::Pair { key, value },
            _ => Definition::Flag(arg),
        }
    }

    /// The key, if this is a pair.
    pub fn key(&self) -> Option<&'a str> {
        match self {
            Definition::Pair { key, .. } => Some(*key),
            Definition::Flag(_) => None,
        }
    }

    /// The merge key this definition targets, if any.
    pub fn merge_key(&self) -> Option<MergeKey> {
        self.key().and_then(MergeKey::from_name)
    }
}

/// Whether an argument sets a Kconfig option (`CONFIG_*`).
pub fn is_kconfig_option(arg: &str) -> bool {
    arg.starts_with(KCONFIG_PREFIX)
}

/// Remove every double quote from an argument.
pub fn strip_quotes(arg: &str) -> String {
    arg.replace('"', "")
}

/// Format an argument as a CMake `-D` definition.
///
/// Kconfig options keep their quotes; string symbols need them. All
/// other arguments have quotes stripped.
pub fn to_cmake_define(arg: &str) -> String {
    if is_kconfig_option(arg) {
        format!("-D{}", arg)
    } else {
        format!("-D{}", strip_quotes(arg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        let def = Definition::parse("CONF_FILE=a.conf;b.conf");
        assert_eq!(
            def,
            Definition::Pair {
                key: "CONF_FILE",
                value: "a.conf;b.conf"
            }
        );
        assert_eq!(def.merge_key(), Some(MergeKey::ConfFile));
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let def = Definition::parse("EXTRA=a=b");
        assert_eq!(def, Definition::Pair { key: "EXTRA", value: "a=b" });
        assert_eq!(def.merge_key(), None);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(Definition::parse("basearg1"), Definition::Flag("basearg1"));
        // No '=' means the merge key is just a flag name
        assert_eq!(Definition::parse("CONF_FILE").merge_key(), None);
    }

    #[test]
    fn test_parse_empty_key_is_flag() {
        assert_eq!(Definition::parse("=value"), Definition::Flag("=value"));
    }

    #[test]
    fn test_merge_key_is_case_sensitive() {
        assert_eq!(Definition::parse("conf_file=a.conf").merge_key(), None);
    }

    #[test]
    fn test_split_semicolon_values() {
        assert_eq!(
            MergeKey::DtcOverlayFile.split_value("w.overlay;;x.overlay;"),
            vec!["w.overlay".to_string(), "x.overlay".to_string()]
        );
    }

    #[test]
    fn test_split_space_values() {
        assert_eq!(
            MergeKey::OverlayConfig.split_value(" a.conf  b.conf "),
            vec!["a.conf".to_string(), "b.conf".to_string()]
        );
    }

    #[test]
    fn test_to_cmake_define_strips_quotes() {
        assert_eq!(to_cmake_define("CONF_FILE=\"a.conf\""), "-DCONF_FILE=a.conf");
    }

    #[test]
    fn test_to_cmake_define_keeps_kconfig_quotes() {
        assert_eq!(
            to_cmake_define("CONFIG_BOARD_NAME=\"qemu\""),
            "-DCONFIG_BOARD_NAME=\"qemu\""
        );
    }
}
