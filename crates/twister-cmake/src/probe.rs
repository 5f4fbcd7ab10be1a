//! Filesystem probe.
//!
//! The assembler asks one existence question of the filesystem. Routing it
//! through a trait keeps assembly testable without touching disk.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Answers filesystem existence queries.
pub trait PathProbe {
    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl PathProbe for HostFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Probe with fixed answers, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    /// Answer for every path not listed in `present`.
    default: bool,
    /// Paths reported as present.
    present: HashSet<PathBuf>,
}

impl StaticProbe {
    /// Report every path as existing.
    pub fn always() -> Self {
        Self {
            default: true,
            present: HashSet::new(),
        }
    }

    /// Report every path as missing.
    pub fn never() -> Self {
        Self::default()
    }

    /// Report only the given paths as existing.
    pub fn with_paths(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            default: false,
            present: paths.into_iter().map(|p| p.into()).collect(),
        }
    }
}

impl PathProbe for StaticProbe {
    fn exists(&self, path: &Path) -> bool {
        self.default || self.present.contains(path)
    }
}
