//! Test-execution handler seen by the assembler.

use serde::{Deserialize, Serialize};

/// A test-execution backend that contributes CMake arguments.
pub trait Handler {
    /// Extra arguments this handler wants passed to CMake.
    fn args(&self) -> &[String];

    /// Whether the handler is ready; arguments are only used when it is.
    fn ready(&self) -> bool;
}

/// Plain handler description, loadable from config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerArgs {
    /// Arguments contributed by the handler.
    #[serde(default)]
    pub args: Vec<String>,

    /// Readiness flag.
    #[serde(default)]
    pub ready: bool,
}

impl HandlerArgs {
    /// A ready handler with the given arguments.
    pub fn ready_with(args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            args: args.into_iter().map(|a| a.into()).collect(),
            ready: true,
        }
    }

    /// A handler that is not ready; its arguments are ignored.
    pub fn idle(args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            ready: false,
            ..Self::ready_with(args)
        }
    }
}

impl Handler for HandlerArgs {
    fn args(&self) -> &[String] {
        &self.args
    }

    fn ready(&self) -> bool {
        self.ready
    }
}
