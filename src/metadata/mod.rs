//! Distribution metadata handling
//!
//! This module provides the lenient header parser for METADATA files, the
//! field mapping type built from it, and dist-info bundle discovery.

mod discovery;
mod parser;
mod record;

pub use discovery::{DIST_INFO_SUFFIX, METADATA_FILE, find_dist_info_dirs, package_name};
pub use parser::{RawMetadata, parse};
pub use record::MetadataRecord;

/// Metadata fields that may occur multiple times, one value per occurrence.
pub const MULTI_VALUE_FIELDS: [&str; 2] = ["Requires-Dist", "Classifier"];

/// The field holding the author contact address used for matching.
pub const AUTHOR_EMAIL_FIELD: &str = "Author-email";

/// The field attached to every collected record for console-script names.
pub const ENTRY_POINTS_FIELD: &str = "entry_points";
