//! Installed-package registry abstraction.
//!
//! The registry is the richer metadata source keyed by package name, separate
//! from the per-directory METADATA parse. It is a trait so the collector can
//! be tested against a mock instead of a real installation.

mod dist_info;

pub use dist_info::DistInfoRegistry;

use anyhow::Result;

use crate::metadata::MetadataRecord;

/// A console-script entry point registered by an installed distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleScript {
    /// Installed command name.
    pub name: String,
    /// Name of the distribution that registered it.
    pub package: String,
}

#[cfg_attr(test, mockall::automock)]
pub trait InstalledRegistry {
    /// Full metadata for a distribution, or `None` when it is not known to
    /// the registry. A miss is expected and recoverable, not an error.
    fn get_metadata(&self, package: &str) -> Result<Option<MetadataRecord>>;

    /// Every value of a multi-valued metadata field, in file order. Empty
    /// when the package or field is unknown.
    fn get_all_values(&self, package: &str, field: &str) -> Result<Vec<String>>;

    /// Console-script entry points of every installed distribution.
    fn console_scripts(&self) -> Result<Vec<ConsoleScript>>;
}
