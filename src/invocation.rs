//! CMake configure invocation
//!
//! Wraps assembled `-D` definitions into a full `cmake` command line.
//! Nothing here spawns the process; callers decide what to do with it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use twister_cmake::PathProbe;

use crate::config::LaneSettings;

/// A fully described `cmake` configure step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmakeInvocation {
    /// CMake executable
    pub cmake: String,

    /// Source directory (`-S`)
    pub source_dir: PathBuf,

    /// Build directory (`-B`)
    pub build_dir: PathBuf,

    /// Generator (`-G`)
    pub generator: String,

    /// Assembled `-D` definitions, in order
    pub definitions: Vec<String>,
}

impl CmakeInvocation {
    /// Assemble definitions from settings and wrap them in an invocation
    pub fn from_settings(settings: &LaneSettings, probe: &dyn PathProbe) -> Self {
        Self {
            cmake: settings.cmake.clone(),
            source_dir: settings.source_dir.clone(),
            build_dir: settings.build_dir.clone(),
            generator: settings.generator.clone(),
            definitions: settings.to_request().assemble(probe),
        }
    }

    /// Arguments after the executable
    pub fn argv(&self) -> Vec<String> {
        let mut argv = vec![
            format!("-B{}", self.build_dir.display()),
            format!("-S{}", self.source_dir.display()),
            format!("-G{}", self.generator),
        ];
        argv.extend(self.definitions.iter().cloned());
        argv
    }

    /// A `Command` ready to spawn
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.cmake);
        cmd.args(self.argv());
        cmd
    }
}

/// POSIX shell rendering: arguments holding whitespace or `'` are
/// single-quoted, with `'` written as `'\''`.
impl fmt::Display for CmakeInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cmake)?;
        for arg in self.argv() {
            if arg.contains(|c: char| c.is_whitespace() || c == '\'') {
                write!(f, " '{}'", arg.replace('\'', "'\\''"))?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
