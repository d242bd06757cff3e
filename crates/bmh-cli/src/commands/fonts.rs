//! Fonts command implementation
//!
//! Lists the TrueType fonts found in a folder with the names `convert
//! --font` accepts.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::fonts::{self, FontScan};

#[derive(Debug, Serialize)]
struct FontListing<'a> {
    name: &'a str,
    path: String,
}

/// Run the fonts command
///
/// # Arguments
/// * `folder` - Folder to scan
/// * `json` - Print a JSON array instead of a table
///
/// # Returns
/// Exit code: 0 if at least one font was found, 1 otherwise
pub fn run(folder: &Path, json: bool) -> Result<ExitCode> {
    let scan = fonts::scan(folder)?;

    if json {
        println!("{}", render_json(&scan)?);
    } else {
        println!("{} {}", "Font folder:".blue().bold(), folder.display());
        println!();
        for font in &scan.fonts {
            println!("  {} {}", font.name.green(), font.path.display().to_string().dimmed());
        }
        for skipped in &scan.skipped {
            println!(
                "  {} {}: {}",
                "WARN".yellow().bold(),
                skipped.path.display(),
                skipped.reason
            );
        }
        println!();
        println!("{} {} fonts", "Found:".cyan().bold(), scan.fonts.len());
    }

    if scan.fonts.is_empty() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn render_json(scan: &FontScan) -> Result<String> {
    let listing: Vec<FontListing<'_>> = scan
        .fonts
        .iter()
        .map(|f| FontListing {
            name: &f.name,
            path: f.path.display().to_string(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&listing)?)
}
