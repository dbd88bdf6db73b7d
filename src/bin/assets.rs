//! CLI maintenance tool for generated front-end assets.
//!
//! Provides the two one-shot steps of the asset pipeline: clearing a build
//! output directory and renaming a file to carry its content hash.
//!
//! # Usage
//!
//! ```bash
//! # Delete the generated stylesheets
//! cargo run --bin assets -- clear ./dist/css
//!
//! # Rename main.css to main.<hash>.css
//! cargo run --bin assets -- fingerprint ./dist/css/main.css
//! ```
//!
//! Exits with code 1 when the path argument is missing or invalid.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use colored::*;

use login_client::utils::dir_clear::clear_directory;
use login_client::utils::fingerprint::fingerprint_file;

/// CLI tool for asset maintenance.
#[derive(Parser)]
#[command(name = "assets")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete every non-hidden file directly inside a directory
    Clear {
        /// Directory to clear (e.g., "./dist/css")
        path: Option<PathBuf>,
    },

    /// Add the content hash to a file's name for cache busting
    Fingerprint {
        /// File to rename (e.g., "./dist/css/main.css")
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Clear { path } => {
            let Some(path) = path else {
                bail!("no directory path provided. Example: 'assets clear ./dist/css'");
            };

            let removed = clear_directory(&path)?;
            println!(
                "{} {} file(s) removed from {}",
                "✓".green(),
                removed,
                path.display()
            );
        }

        Commands::Fingerprint { path } => {
            let Some(path) = path else {
                bail!("no file path provided. Example: 'assets fingerprint ./dist/css/main.css'");
            };

            let new_path = fingerprint_file(&path)?;
            println!(
                "{} {} -> {}",
                "✓".green(),
                path.display(),
                new_path.display()
            );
        }
    }

    Ok(())
}
