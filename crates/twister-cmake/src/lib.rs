//! CMake argument assembly for test-suite builds.
//!
//! Merges base arguments, handler arguments, extra Kconfig/devicetree
//! fragments and extra CMake definitions into one ordered list of `-D`
//! definitions.

mod definition;
mod fragment;
mod handler;
mod probe;
mod request;

pub use definition::{is_kconfig_option, strip_quotes, to_cmake_define, Definition, MergeKey};
pub use fragment::{
    remove_testsuite_extra_conf, testsuite_extra_conf_path, validate_entries,
    write_testsuite_extra_conf, FragmentError, EXTRA_CONF_NAME, RUNNER_SUBDIR,
};
pub use handler::{Handler, HandlerArgs};
pub use probe::{HostFs, PathProbe, StaticProbe};
pub use request::AssembleRequest;

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

/// Assemble the `-D` definitions for a CMake configure step.
///
/// Output order is fixed:
/// 1. `cmake_extra_args`, verbatim;
/// 2. base arguments other than merge-key entries, in order;
/// 3. handler arguments, when the handler is ready;
/// 4. `CONF_FILE`, `DTC_OVERLAY_FILE` and `OVERLAY_CONFIG`, each merged
///    from the base entries and the matching extra list.
///
/// `OVERLAY_CONFIG` also picks up `<build_dir>/twister/testsuite_extra.conf`
/// when `probe` reports it exists; the path is rendered lossily, so a
/// non-UTF-8 build dir yields replacement characters. A merge key is
/// emitted when the base arguments name it, even with an empty value
/// (`-DCONF_FILE=` clears a cached variable), or when extras feed it.
#[allow(clippy::too_many_arguments)]
pub fn assemble_args(
    extra_args: &[String],
    handler: &dyn Handler,
    extra_conf_files: &[String],
    extra_overlay_confs: &[String],
    extra_dtc_overlay_files: &[String],
    cmake_extra_args: &[String],
    build_dir: &Path,
    probe: &dyn PathProbe,
) -> Vec<String> {
    let mut merged: BTreeMap<MergeKey, Vec<String>> = BTreeMap::new();
    let mut args: Vec<String> = Vec::new();

    for arg in extra_args {
        let unquoted = strip_quotes(arg);
        let def = Definition::parse(&unquoted);
        match (def.merge_key(), &def) {
            (Some(key), Definition::Pair { value, .. }) => {
                merged.entry(key).or_default().extend(key.split_value(value));
            }
            _ => args.push(arg.clone()),
        }
    }

    if handler.ready() {
        args.extend(handler.args().iter().cloned());
    }

    let mut overlays = extra_overlay_confs.to_vec();
    let additional_overlay = testsuite_extra_conf_path(build_dir);
    if probe.exists(&additional_overlay) {
        overlays.push(additional_overlay.to_string_lossy().to_string());
    }

    for (key, extras) in [
        (MergeKey::ConfFile, extra_conf_files.to_vec()),
        (MergeKey::DtcOverlayFile, extra_dtc_overlay_files.to_vec()),
        (MergeKey::OverlayConfig, overlays),
    ] {
        if !extras.is_empty() {
            merged.entry(key).or_default().extend(extras);
        }
    }

    for (key, values) in &merged {
        debug!(key = key.name(), count = values.len(), "merged list definition");
        args.push(format!("{}={}", key.name(), values.join(key.separator())));
    }

    let mut expanded: Vec<String> = cmake_extra_args.iter().map(|a| format!("-D{}", a)).collect();
    expanded.extend(args.iter().map(|a| to_cmake_define(a)));
    expanded
}
