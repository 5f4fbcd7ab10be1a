//! Twister lane - CMake configure arguments for test-suite builds
//!
//! This crate layers host, repo and command-line configuration, then hands
//! the result to [`twister_cmake`] to assemble the `-D` definitions for a
//! suite's CMake configure step.

pub mod config;
pub mod invocation;
pub mod logging;

pub use config::{ConfigError, EffectiveConfig, LaneSettings};
pub use invocation::CmakeInvocation;
pub use twister_cmake::{
    assemble_args, remove_testsuite_extra_conf, write_testsuite_extra_conf, AssembleRequest,
    FragmentError, Handler, HandlerArgs, HostFs, PathProbe, StaticProbe,
};

/// Errors surfaced by the lane.
#[derive(Debug, thiserror::Error)]
pub enum LaneError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fragment(#[from] FragmentError),
}

/// Write the suite's extra fragment, then assemble its invocation.
///
/// A suite without extra configs gets any fragment left in its build dir
/// by an earlier run removed, so `OVERLAY_CONFIG` never names stale
/// settings. With `dry_run` nothing is written or removed and the fragment
/// is treated as present exactly when there are extra configs to put in it.
pub fn prepare(settings: &LaneSettings, dry_run: bool) -> Result<CmakeInvocation, LaneError> {
    if dry_run {
        let probe = if settings.extra_configs.is_empty() {
            StaticProbe::never()
        } else {
            StaticProbe::with_paths([twister_cmake::testsuite_extra_conf_path(&settings.build_dir)])
        };
        return Ok(CmakeInvocation::from_settings(settings, &probe));
    }

    if settings.extra_configs.is_empty() {
        remove_testsuite_extra_conf(&settings.build_dir)?;
    } else {
        write_testsuite_extra_conf(&settings.build_dir, &settings.extra_configs)?;
    }
    Ok(CmakeInvocation::from_settings(settings, &HostFs))
}
