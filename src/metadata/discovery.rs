use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Suffix marking a directory as a distribution metadata bundle.
pub const DIST_INFO_SUFFIX: &str = ".dist-info";

/// Name of the metadata file inside a bundle.
pub const METADATA_FILE: &str = "METADATA";

/// Find all distribution metadata bundles directly under `root`.
///
/// Directory structure: `<root>/<package>-<version>.dist-info/METADATA`.
/// Results are sorted; filesystem enumeration order is platform dependent.
#[tracing::instrument(skip(runtime, root))]
pub fn find_dist_info_dirs<R: Runtime>(runtime: &R, root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = runtime
        .read_dir(root)?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(DIST_INFO_SUFFIX))
        })
        .filter(|path| runtime.is_dir(path))
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// The package name encoded in a bundle directory name: everything before the
/// first `-`. A name without a dash is returned whole.
pub fn package_name(dir: &Path) -> Option<&str> {
    let name = dir.file_name()?.to_str()?;
    name.split('-').next()
}
