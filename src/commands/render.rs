//! Terminal rendering and JSON export for collected packages.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::Path;

use crate::collect::PackageMap;
use crate::metadata::ENTRY_POINTS_FIELD;
use crate::runtime::Runtime;

const SEPARATOR_WIDTH: usize = 80;

/// Print the collected packages, one colored block per package.
pub fn print_packages(packages: &PackageMap, target_emails: &[String], requirements: bool) {
    if target_emails.is_empty() {
        println!("Found {} packages:", packages.len());
    } else {
        println!(
            "Found {} packages by {}:",
            packages.len(),
            target_emails.join(", ")
        );
    }

    for (name, record) in packages {
        println!("{}", "-".repeat(SEPARATOR_WIDTH));
        println!("\n{}", format!("{}:", name).green());
        println!(
            "{}",
            format!("Version: {}", record.get("Version").unwrap_or("N/A")).red()
        );
        println!(
            "{}",
            format!("Summary: {}", record.get("Summary").unwrap_or("N/A")).cyan()
        );
        println!(
            "{}",
            format!("Author: {}", record.get("Author").unwrap_or("N/A")).yellow()
        );

        let entry_points = record.values(ENTRY_POINTS_FIELD);
        if entry_points.is_empty() {
            println!("{}", "No entry points".white().underline());
        } else {
            println!(
                "{}",
                format!("Entry Points: {}", entry_points.join(", "))
                    .white()
                    .underline()
            );
        }

        match record.get("Description") {
            Some(description) if !description.is_empty() => {
                println!("Description:\n{}", description);
            }
            _ => println!("No description"),
        }

        if requirements {
            let requires = record.values("Requires-Dist");
            if !requires.is_empty() {
                println!("{}", "Requirements:".red().underline());
                for requirement in requires {
                    println!("{}", format!("    - {}", requirement).red().underline());
                }
            }
        }

        println!("{}", "-".repeat(SEPARATOR_WIDTH));
    }
}

/// Serialize the package map to `path` as JSON, 4-space indented.
#[tracing::instrument(skip(runtime, packages))]
pub fn save_json<R: Runtime>(runtime: &R, packages: &PackageMap, path: &Path) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    packages.serialize(&mut serializer)?;
    buf.push(b'\n');
    runtime.write(path, &buf)?;
    Ok(())
}
