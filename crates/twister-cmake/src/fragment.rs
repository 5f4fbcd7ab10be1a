//! Per-suite extra Kconfig fragment (`twister/testsuite_extra.conf`).
//!
//! Test suites may declare extra Kconfig settings. They are written to a
//! fragment under the build directory, which the assembler then appends to
//! `OVERLAY_CONFIG` when present.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex_lite::Regex;
use tracing::info;

/// Subdirectory of the build directory holding runner-generated files.
pub const RUNNER_SUBDIR: &str = "twister";

/// File name of the extra Kconfig fragment.
pub const EXTRA_CONF_NAME: &str = "testsuite_extra.conf";

/// Errors raised while writing the extra fragment.
#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid extra config entry: {0} (expected CONFIG_<NAME>=<value>)")]
    InvalidEntry(String),
}

fn entry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^CONFIG_[A-Za-z0-9_]+=.*$").expect("literal pattern"))
}

/// Path of the extra fragment for a build directory.
pub fn testsuite_extra_conf_path(build_dir: &Path) -> PathBuf {
    build_dir.join(RUNNER_SUBDIR).join(EXTRA_CONF_NAME)
}

/// Check that every entry is a `CONFIG_<NAME>=<value>` assignment.
pub fn validate_entries(configs: &[String]) -> Result<(), FragmentError> {
    match configs.iter().find(|c| !entry_pattern().is_match(c)) {
        Some(bad) => Err(FragmentError::InvalidEntry(bad.clone())),
        None => Ok(()),
    }
}

/// Write the extra fragment for `build_dir`.
///
/// Returns the path written, or `None` when there is nothing to write.
/// Entries are validated before anything touches disk.
pub fn write_testsuite_extra_conf(
    build_dir: &Path,
    configs: &[String],
) -> Result<Option<PathBuf>, FragmentError> {
    if configs.is_empty() {
        return Ok(None);
    }
    validate_entries(configs)?;

    let path = testsuite_extra_conf_path(build_dir);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut contents = configs.join("\n");
    contents.push('\n');
    fs::write(&path, contents)?;

    info!(path = %path.display(), entries = configs.len(), "wrote extra config fragment");
    Ok(Some(path))
}

/// Delete a fragment left by an earlier run of the same build directory.
///
/// Returns whether a file was removed; a missing fragment is not an error.
pub fn remove_testsuite_extra_conf(build_dir: &Path) -> Result<bool, FragmentError> {
    let path = testsuite_extra_conf_path(build_dir);
    match fs::remove_file(&path) {
        Ok(()) => {
            info!(path = %path.display(), "removed stale extra config fragment");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{HostFs, PathProbe};
    use tempfile::TempDir;

    fn configs(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_path_layout() {
        assert_eq!(
            testsuite_extra_conf_path(Path::new("/builddir/")),
            PathBuf::from("/builddir/twister/testsuite_extra.conf")
        );
    }

    #[test]
    fn test_write_creates_fragment() {
        let dir = TempDir::new().unwrap();
        let written = write_testsuite_extra_conf(
            dir.path(),
            &configs(&["CONFIG_ZTEST=y", "CONFIG_BOARD_NAME=\"qemu\""]),
        )
        .unwrap()
        .unwrap();

        assert_eq!(written, testsuite_extra_conf_path(dir.path()));
        assert!(HostFs.exists(&written));
        let text = fs::read_to_string(&written).unwrap();
        assert_eq!(text, "CONFIG_ZTEST=y\nCONFIG_BOARD_NAME=\"qemu\"\n");
    }

    #[test]
    fn test_empty_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let written = write_testsuite_extra_conf(dir.path(), &[]).unwrap();
        assert!(written.is_none());
        assert!(!testsuite_extra_conf_path(dir.path()).exists());
    }

    #[test]
    fn test_invalid_entry_rejected_before_write() {
        let dir = TempDir::new().unwrap();
        let result =
            write_testsuite_extra_conf(dir.path(), &configs(&["CONFIG_OK=y", "FOO=bar"]));

        match result {
            Err(FragmentError::InvalidEntry(entry)) => assert_eq!(entry, "FOO=bar"),
            other => panic!("expected InvalidEntry, got {:?}", other),
        }
        assert!(!testsuite_extra_conf_path(dir.path()).exists());
    }

    #[test]
    fn test_remove_stale_fragment() {
        let dir = TempDir::new().unwrap();
        write_testsuite_extra_conf(dir.path(), &configs(&["CONFIG_ZTEST=y"])).unwrap();

        assert!(remove_testsuite_extra_conf(dir.path()).unwrap());
        assert!(!HostFs.exists(&testsuite_extra_conf_path(dir.path())));
        // Second call finds nothing to remove
        assert!(!remove_testsuite_extra_conf(dir.path()).unwrap());
    }
}
