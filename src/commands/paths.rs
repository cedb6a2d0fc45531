use anyhow::{Result, bail};
use log::info;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Resolve the default installed-distributions folder.
///
/// Probes, in order: the active virtualenv ($VIRTUAL_ENV/lib), the per-user
/// install tree (~/.local/lib), then the system site-packages.
#[tracing::instrument(skip(runtime))]
pub fn default_packages_folder<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    if let Ok(venv) = runtime.env_var("VIRTUAL_ENV") {
        if let Some(path) = site_packages_under(runtime, &PathBuf::from(venv).join("lib"))? {
            info!("Using virtualenv site-packages: {}", path.display());
            return Ok(path);
        }
    }

    if let Some(home) = runtime.home_dir() {
        if let Some(path) = site_packages_under(runtime, &home.join(".local").join("lib"))? {
            info!("Using user site-packages: {}", path.display());
            return Ok(path);
        }
    }

    let system = system_site_packages();
    if runtime.is_dir(&system) {
        info!("Using system site-packages: {}", system.display());
        return Ok(system);
    }

    bail!("Could not find an installed-packages folder; pass --packages-folder");
}

/// Find `<lib_dir>/python*/site-packages`, preferring the newest interpreter
/// version present.
fn site_packages_under<R: Runtime>(runtime: &R, lib_dir: &Path) -> Result<Option<PathBuf>> {
    if !runtime.is_dir(lib_dir) {
        return Ok(None);
    }

    let mut versions: Vec<PathBuf> = runtime
        .read_dir(lib_dir)?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("python"))
        })
        .collect();
    versions.sort();

    for dir in versions.into_iter().rev() {
        let site = dir.join("site-packages");
        if runtime.is_dir(&site) {
            return Ok(Some(site));
        }
    }

    Ok(None)
}

#[cfg(target_os = "windows")]
fn system_site_packages() -> PathBuf {
    PathBuf::from(r"C:\Program Files\Python313\Lib\site-packages")
}

#[cfg(not(target_os = "windows"))]
fn system_site_packages() -> PathBuf {
    PathBuf::from("/usr/lib/python3/dist-packages")
}
