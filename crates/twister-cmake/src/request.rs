//! Assembly inputs gathered into one serializable request.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::handler::HandlerArgs;
use crate::probe::PathProbe;

/// Every input to [`assemble_args`](crate::assemble_args) in one place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembleRequest {
    /// Base arguments (`KEY=VALUE` or bare flags).
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Handler contributing extra arguments.
    #[serde(default)]
    pub handler: HandlerArgs,

    /// Kconfig fragments appended to `CONF_FILE`.
    #[serde(default)]
    pub extra_conf_files: Vec<String>,

    /// Kconfig overlays appended to `OVERLAY_CONFIG`.
    #[serde(default)]
    pub extra_overlay_confs: Vec<String>,

    /// Devicetree overlays appended to `DTC_OVERLAY_FILE`.
    #[serde(default)]
    pub extra_dtc_overlay_files: Vec<String>,

    /// Definitions emitted first, verbatim.
    #[serde(default)]
    pub cmake_extra_args: Vec<String>,

    /// Build directory the extra fragment is looked up under.
    #[serde(default)]
    pub build_dir: PathBuf,
}

impl AssembleRequest {
    /// Run the assembler over this request.
    pub fn assemble(&self, probe: &dyn PathProbe) -> Vec<String> {
        crate::assemble_args(
            &self.extra_args,
            &self.handler,
            &self.extra_conf_files,
            &self.extra_overlay_confs,
            &self.extra_dtc_overlay_files,
            &self.cmake_extra_args,
            &self.build_dir,
            probe,
        )
    }
}
