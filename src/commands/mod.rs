//! Command layer: resolve inputs, run the collector, render the result.

mod paths;
mod render;

pub use paths::default_packages_folder;
pub use render::{print_packages, save_json};

use anyhow::{Result, bail};
use log::debug;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

use crate::collect::{PackageMap, collect_by_author_email};
use crate::metadata::{self, AUTHOR_EMAIL_FIELD, METADATA_FILE, find_dist_info_dirs};
use crate::registry::DistInfoRegistry;
use crate::runtime::Runtime;

/// File written next to the caller when JSON output is requested.
pub const JSON_OUTPUT_FILE: &str = "packages.json";

/// Options for the scan operation, straight from the CLI.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Author emails to match; empty means "every author in the folder".
    pub emails: Vec<String>,
    /// Folder to scan; resolved to a default when absent.
    pub packages_folder: Option<PathBuf>,
    /// Print each package's requirement list.
    pub requirements: bool,
    /// Persist the result map to packages.json.
    pub save_json: bool,
}

/// Scan installed distributions and print the matches.
#[tracing::instrument(skip(runtime, options))]
pub fn scan<R: Runtime>(runtime: R, options: ScanOptions) -> Result<()> {
    let folder = match options.packages_folder {
        Some(path) => path,
        None => default_packages_folder(&runtime)?,
    };
    debug!("Scanning distributions in {:?}", folder);

    let registry = DistInfoRegistry::new(&runtime, folder.clone());

    let packages = if options.emails.is_empty() {
        // "Match every author" mode: the core requires a non-empty email
        // list, so gather the folder's author emails first.
        let emails = all_author_emails(&runtime, &folder)?;
        debug!("Match-all mode, found {} author email(s)", emails.len());
        if emails.is_empty() {
            PackageMap::new()
        } else {
            collect_by_author_email(&runtime, &registry, &emails, &folder)?
        }
    } else {
        collect_by_author_email(&runtime, &registry, &options.emails, &folder)?
    };

    if options.save_json {
        save_json(&runtime, &packages, Path::new(JSON_OUTPUT_FILE))?;
        println!("{}", format!("Results saved to {}", JSON_OUTPUT_FILE).green());
    }

    print_packages(&packages, &options.emails, options.requirements);
    Ok(())
}

/// The distinct lowercase author emails present in a packages folder.
/// Addresses without `@` can never match and are dropped.
fn all_author_emails<R: Runtime>(runtime: &R, folder: &Path) -> Result<Vec<String>> {
    if !runtime.exists(folder) {
        bail!("Folder {} does not exist", folder.display());
    }
    if !runtime.is_dir(folder) {
        bail!("{} is not a directory", folder.display());
    }

    let mut emails = Vec::new();
    for dir in find_dist_info_dirs(runtime, folder)? {
        let metadata_path = dir.join(METADATA_FILE);
        if !runtime.exists(&metadata_path) {
            continue;
        }
        let raw = metadata::parse(&runtime.read_to_string(&metadata_path)?);
        if let Some(email) = raw.get(AUTHOR_EMAIL_FIELD) {
            let email = email.to_lowercase();
            if email.contains('@') && !emails.contains(&email) {
                emails.push(email);
            }
        }
    }
    Ok(emails)
}
