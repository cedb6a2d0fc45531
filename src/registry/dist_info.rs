use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use super::{ConsoleScript, InstalledRegistry};
use crate::metadata::{self, METADATA_FILE, MetadataRecord, RawMetadata, find_dist_info_dirs};
use crate::runtime::Runtime;

const ENTRY_POINTS_FILE: &str = "entry_points.txt";
const CONSOLE_SCRIPTS_SECTION: &str = "console_scripts";

/// Registry implementation backed by the dist-info bundles of a packages
/// folder. Lookups are keyed by the package name encoded in the bundle
/// directory names.
pub struct DistInfoRegistry<'a, R: Runtime> {
    runtime: &'a R,
    root: PathBuf,
}

impl<'a, R: Runtime> DistInfoRegistry<'a, R> {
    pub fn new(runtime: &'a R, root: PathBuf) -> Self {
        Self { runtime, root }
    }

    fn locate(&self, package: &str) -> Result<Option<PathBuf>> {
        for dir in find_dist_info_dirs(self.runtime, &self.root)? {
            if metadata::package_name(&dir) == Some(package) {
                return Ok(Some(dir));
            }
        }
        Ok(None)
    }

    fn load_raw(&self, dir: &Path) -> Result<Option<RawMetadata>> {
        let path = dir.join(METADATA_FILE);
        if !self.runtime.exists(&path) {
            debug!("No {} in {:?}", METADATA_FILE, dir);
            return Ok(None);
        }
        let content = self.runtime.read_to_string(&path)?;
        Ok(Some(metadata::parse(&content)))
    }

    /// The owning package name of a bundle: its `Name` header when present,
    /// else the directory-name prefix.
    fn dist_name(&self, dir: &Path, raw: &RawMetadata) -> Option<String> {
        raw.get("Name")
            .map(str::to_string)
            .or_else(|| metadata::package_name(dir).map(str::to_string))
    }
}

impl<R: Runtime> InstalledRegistry for DistInfoRegistry<'_, R> {
    #[tracing::instrument(skip(self))]
    fn get_metadata(&self, package: &str) -> Result<Option<MetadataRecord>> {
        let Some(dir) = self.locate(package)? else {
            return Ok(None);
        };
        Ok(self.load_raw(&dir)?.map(|raw| raw.flatten()))
    }

    #[tracing::instrument(skip(self))]
    fn get_all_values(&self, package: &str, field: &str) -> Result<Vec<String>> {
        let Some(dir) = self.locate(package)? else {
            return Ok(Vec::new());
        };
        let Some(raw) = self.load_raw(&dir)? else {
            return Ok(Vec::new());
        };
        Ok(raw.get_all(field).into_iter().map(str::to_string).collect())
    }

    #[tracing::instrument(skip(self))]
    fn console_scripts(&self) -> Result<Vec<ConsoleScript>> {
        let mut scripts = Vec::new();

        for dir in find_dist_info_dirs(self.runtime, &self.root)? {
            let entry_points_path = dir.join(ENTRY_POINTS_FILE);
            if !self.runtime.exists(&entry_points_path) {
                continue;
            }

            let raw = self.load_raw(&dir)?.unwrap_or_default();
            let Some(package) = self.dist_name(&dir, &raw) else {
                continue;
            };

            let content = self.runtime.read_to_string(&entry_points_path)?;
            for name in parse_console_scripts(&content) {
                scripts.push(ConsoleScript {
                    name,
                    package: package.clone(),
                });
            }
        }

        Ok(scripts)
    }
}

/// Extract the script names of the `[console_scripts]` section of an
/// entry_points.txt file. Lines look like `name = module:attr`.
fn parse_console_scripts(content: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut in_section = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = section.trim() == CONSOLE_SCRIPTS_SECTION;
            continue;
        }
        if in_section {
            if let Some((name, _target)) = line.split_once('=') {
                let name = name.trim();
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
        }
    }

    names
}
