//! bmh CLI - TrueType fonts to bitmap headers
//!
//! Renders fonts into the byte-packed glyph arrays used by SSD1306-style
//! displays and writes them as C headers.

mod cli_args;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use bmh_cli::commands;
use bmh_cli::config::ConvertConfig;
use bmh_cli::fonts::default_font_folder;
use cli_args::{Cli, Commands, ConvertArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert(args) => run_convert(&args),
        Commands::Fonts { ttf_folder, json } => {
            let folder = ttf_folder.unwrap_or_else(default_font_folder);
            commands::fonts::run(&folder, json)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

fn run_convert(args: &ConvertArgs) -> Result<ExitCode> {
    let mut config = match &args.config {
        Some(path) => ConvertConfig::load(path)?,
        None => ConvertConfig::default(),
    };
    config.apply(args.overrides()?);
    commands::convert::run(&config)
}
