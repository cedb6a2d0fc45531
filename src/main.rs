use anyhow::Result;
use clap::Parser;
use distscan::commands::{ScanOptions, scan};
use std::path::PathBuf;

/// distscan - find installed Python distributions by author email
///
/// Scans a site-packages style folder of *.dist-info metadata bundles and
/// prints every package whose Author-email matches one of the given
/// addresses. With no addresses, every package in the folder is listed.
///
/// Examples:
///   distscan me@example.com                    # packages I authored
///   distscan --packages-folder /path/to/site-packages
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Author emails to search for (omit to list every package)
    #[arg(value_name = "EMAIL")]
    emails: Vec<String>,

    /// Folder containing installed distributions (overrides defaults; also
    /// via DISTSCAN_PACKAGES_FOLDER)
    #[arg(
        long = "packages-folder",
        short = 'p',
        env = "DISTSCAN_PACKAGES_FOLDER",
        value_name = "PATH"
    )]
    packages_folder: Option<PathBuf>,

    /// Print each package's requirements if available
    #[arg(long)]
    requirements: bool,

    /// Save results to packages.json
    #[arg(long = "save-json")]
    save_json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = distscan::runtime::RealRuntime;

    scan(
        runtime,
        ScanOptions {
            emails: cli.emails,
            packages_folder: cli.packages_folder,
            requirements: cli.requirements,
            save_json: cli.save_json,
        },
    )
}
