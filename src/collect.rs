//! Core collection routine: match installed distributions by author email.

use anyhow::{Result, bail};
use log::debug;
use std::collections::BTreeMap;
use std::path::Path;

use crate::metadata::{
    self, AUTHOR_EMAIL_FIELD, ENTRY_POINTS_FIELD, METADATA_FILE, MULTI_VALUE_FIELDS,
    MetadataRecord, find_dist_info_dirs,
};
use crate::registry::InstalledRegistry;
use crate::runtime::Runtime;

/// Collected packages, keyed by package name. Keys are sorted so output is
/// deterministic regardless of filesystem enumeration order.
pub type PackageMap = BTreeMap<String, MetadataRecord>;

/// Collect metadata of every installed distribution whose `Author-email`
/// matches one of `target_emails`, case-insensitively.
///
/// Scans the dist-info bundles of `packages_folder`, prefers the registry's
/// metadata for each match (with full value lists for multi-valued fields),
/// falls back to the bundle's own METADATA parse when the registry does not
/// know the package, and attaches the registry's console-script names to
/// each matched record.
///
/// Fails up front on an empty email list, an email without `@`, or a
/// `packages_folder` that is missing or not a directory. A bundle without a
/// METADATA file is skipped; one whose METADATA cannot be read is an error.
#[tracing::instrument(skip(runtime, registry, packages_folder))]
pub fn collect_by_author_email<R: Runtime, I: InstalledRegistry>(
    runtime: &R,
    registry: &I,
    target_emails: &[String],
    packages_folder: &Path,
) -> Result<PackageMap> {
    if target_emails.is_empty() {
        bail!("No target emails provided");
    }
    for email in target_emails {
        if !email.contains('@') {
            bail!("Invalid author email (missing '@'): {}", email);
        }
    }
    if !runtime.exists(packages_folder) {
        bail!("Folder {} does not exist", packages_folder.display());
    }
    if !runtime.is_dir(packages_folder) {
        bail!("{} is not a directory", packages_folder.display());
    }

    let targets: Vec<String> = target_emails.iter().map(|e| e.to_lowercase()).collect();
    let mut result = PackageMap::new();

    for dir in find_dist_info_dirs(runtime, packages_folder)? {
        let metadata_path = dir.join(METADATA_FILE);
        if !runtime.exists(&metadata_path) {
            debug!("No {} in {:?}, skipping", METADATA_FILE, dir);
            continue;
        }

        let raw = metadata::parse(&runtime.read_to_string(&metadata_path)?);
        let author_email = raw.get(AUTHOR_EMAIL_FIELD).unwrap_or("");
        if !targets.contains(&author_email.to_lowercase()) {
            continue;
        }

        let Some(name) = metadata::package_name(&dir) else {
            continue;
        };

        let mut record = match registry.get_metadata(name)? {
            Some(mut full) => {
                for field in MULTI_VALUE_FIELDS {
                    if full.contains(field) {
                        let values = registry.get_all_values(name, field)?;
                        if !values.is_empty() {
                            full.set_list(field, values);
                        }
                    }
                }
                full
            }
            None => {
                debug!("{} not in registry, using parsed METADATA", name);
                raw.flatten()
            }
        };

        record.set_list(ENTRY_POINTS_FIELD, Vec::new());
        let _ = result.insert(name.to_string(), record);
    }

    for script in registry.console_scripts()? {
        if let Some(record) = result.get_mut(&script.package) {
            record.push_entry_point(&script.name);
        }
    }

    Ok(result)
}
