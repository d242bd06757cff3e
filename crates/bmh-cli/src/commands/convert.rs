//! Convert command implementation
//!
//! Renders every selected font at every requested pixel height and writes
//! the header, preview strip and metadata for each job.

use std::fs;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use bmh_core::{
    assemble, build, render_ascii, CharacterSet, FontDescriptor, GlyphRecord, GrayBuffer, NominalWidth,
    PackingPolicy, PreviewStrip, Sizing,
};
use bmh_export::png::{write_grayscale_with_hash, PngConfig};
use bmh_export::{write_header, write_metadata, FontMetadata, GenerationLog, OutputPaths};
use colored::Colorize;
use rayon::prelude::*;

use crate::config::ConvertConfig;
use crate::fonts::{self, FontFile};
use crate::raster::GlyphRasterizer;
use crate::sizes::JobSize;

/// Files written for one (font, pixel height) job.
#[derive(Debug, Clone)]
pub struct JobOutput {
    /// Output locations.
    pub paths: OutputPaths,
    /// BLAKE3 hash of the header.
    pub header_hash: String,
    /// BLAKE3 hash of the preview PNG, when written.
    pub preview_hash: Option<String>,
    /// Number of glyphs in the header.
    pub glyph_count: usize,
    /// Total bitmap bytes.
    pub total_bytes: usize,
}

/// Run the convert command
///
/// # Arguments
/// * `config` - Resolved conversion settings
///
/// # Returns
/// Exit code: 0 success, 1 if any job failed
pub fn run(config: &ConvertConfig) -> Result<ExitCode> {
    config.validate()?;

    let charset = config.charset.load()?;
    if charset.is_empty() {
        bail!("Character set is empty");
    }

    let font_folder = config.font_folder();
    println!("{}", "======================================".cyan());
    println!("{}", "  bmh TrueType to Bitmap Header".cyan());
    println!("{}", "======================================".cyan());
    println!();
    println!("{} {}", "Font folder:".blue().bold(), font_folder.display());
    println!("{} {}", "Output folder:".blue().bold(), config.output_folder.display());
    println!("{} {:?}", "Font sizes:".blue().bold(), config.fontsizes);
    println!("{} {}", "Characters:".blue().bold(), charset.as_line());
    println!();

    let scan = fonts::scan(&font_folder)?;
    for skipped in &scan.skipped {
        println!(
            "{} {}: {}",
            "WARN".yellow().bold(),
            skipped.path.display(),
            skipped.reason
        );
    }
    let selected = scan.select(config.font.as_deref())?;
    if selected.is_empty() {
        bail!("No .ttf fonts found in {}", font_folder.display());
    }

    fs::create_dir_all(&config.output_folder).with_context(|| {
        format!(
            "Failed to create output folder: {}",
            config.output_folder.display()
        )
    })?;

    let mut log = GenerationLog::new();
    let mut failed = 0usize;
    let mut succeeded = 0usize;

    for font in &selected {
        println!("{} {} ({})", "Converting:".cyan().bold(), font.name, font.path.display());
        let data = match font.read() {
            Ok(data) => data,
            Err(e) => {
                eprintln!("  {} {:#}", "FAILED".red().bold(), e);
                failed += config.fontsizes.len();
                continue;
            }
        };

        for &height in &config.fontsizes {
            match convert_job(font, &data, height, &charset, config) {
                Ok(output) => {
                    println!(
                        "  {} {} ({} glyphs, {} bytes)",
                        "SUCCESS".green().bold(),
                        output.paths.header.display(),
                        output.glyph_count,
                        output.total_bytes
                    );
                    println!("    {} {}", "Hash:".dimmed(), output.header_hash);
                    if let Some(hash) = &output.preview_hash {
                        println!("    {} {}", "Preview:".dimmed(), hash);
                    }
                    log.push(output.paths.header_file_name(), output.header_hash);
                    succeeded += 1;
                }
                Err(e) => {
                    eprintln!("  {} {} px: {:#}", "FAILED".red().bold(), height, e);
                    failed += 1;
                }
            }
        }
    }

    log.write(&config.output_folder)
        .with_context(|| format!("Failed to write log in {}", config.output_folder.display()))?;

    println!();
    println!("{}", "======================================".cyan());
    println!(
        "{} {} generated, {} failed",
        "Summary:".cyan().bold(),
        succeeded,
        failed
    );

    if failed > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Convert one font at one pixel height.
pub fn convert_job(
    font: &FontFile,
    data: &[u8],
    height: u32,
    charset: &CharacterSet,
    config: &ConvertConfig,
) -> Result<JobOutput> {
    let size = JobSize::new(height, &config.size_options())?;
    let policy = config.policy.resolve(size.width, size.height)?;
    let rasterizer = GlyphRasterizer::new(data, size, config.anchor)
        .with_context(|| format!("Failed to load {}", font.path.display()))?;

    for &c in charset.chars() {
        if c != ' ' && !rasterizer.has_glyph(c) {
            println!("  {} '{}' (U+{:04X}) is not in the font", "WARN".yellow().bold(), c, c as u32);
        }
    }

    let rendered = render_glyphs(&rasterizer, charset, &policy);

    for (grid, record) in &rendered {
        if let Some(warning) = record.warning() {
            println!(
                "  {} U+{:04X}: {}",
                "WARN".yellow().bold(),
                record.codepoint(),
                warning
            );
        }
        if config.print_ascii {
            println!("'{}' U+{:04X}", record.character().unwrap_or('?'), record.codepoint());
            print!("{}", render_ascii(grid, record.region(), policy.threshold));
        }
    }

    let paths = OutputPaths::new(&config.output_folder, &font.name, height);
    fs::create_dir_all(&paths.dir)
        .with_context(|| format!("Failed to create directory: {}", paths.dir.display()))?;

    let preview_hash = if config.preview {
        let strip = preview_strip(&rendered, &policy, size);
        let hash = write_grayscale_with_hash(&strip, &paths.preview, &PngConfig::default())
            .with_context(|| format!("Failed to write preview: {}", paths.preview.display()))?;
        Some(hash)
    } else {
        None
    };

    let descriptor = assemble_font(font, height, charset, &policy, rendered)?;

    let header_hash = write_header(&descriptor, &paths.header, &config.header)
        .with_context(|| format!("Failed to write header: {}", paths.header.display()))?;

    if config.metadata {
        let metadata = FontMetadata::from_descriptor(&descriptor).with_header_hash(header_hash.clone());
        write_metadata(&metadata, &paths.metadata)
            .with_context(|| format!("Failed to write metadata: {}", paths.metadata.display()))?;
    }

    Ok(JobOutput {
        paths,
        header_hash,
        preview_hash,
        glyph_count: descriptor.len(),
        total_bytes: descriptor.total_bytes(),
    })
}

/// Rasterize and build every character, in character-set order.
fn render_glyphs(
    rasterizer: &GlyphRasterizer,
    charset: &CharacterSet,
    policy: &PackingPolicy,
) -> Vec<(GrayBuffer, GlyphRecord)> {
    charset
        .chars()
        .par_iter()
        .map(|&c| {
            let grid = rasterizer.render(c);
            let record = build(&grid, c as u32, policy);
            (grid, record)
        })
        .collect()
}

fn preview_strip(rendered: &[(GrayBuffer, GlyphRecord)], policy: &PackingPolicy, size: JobSize) -> GrayBuffer {
    let max_width = rendered.iter().map(|(_, r)| r.width()).max().unwrap_or(0);
    let gap = if policy.width.is_variable() { 1 } else { 0 };
    let mut strip = PreviewStrip::new(rendered.len(), max_width, size.height, gap, policy.threshold);
    for (grid, record) in rendered {
        strip.push(grid, record);
    }
    strip.finish()
}

fn assemble_font(
    font: &FontFile,
    height: u32,
    charset: &CharacterSet,
    policy: &PackingPolicy,
    rendered: Vec<(GrayBuffer, GlyphRecord)>,
) -> Result<FontDescriptor> {
    let nominal_width = match policy.width {
        Sizing::Fixed(width) => NominalWidth::Fixed(width),
        Sizing::Variable => NominalWidth::Variable,
    };
    let descriptor = assemble(
        font.name.clone(),
        height,
        nominal_width,
        policy.orientation,
        &charset.codepoints(),
        rendered.into_iter().map(|(_, record)| record),
    )?;
    Ok(descriptor.with_variable_height(policy.height.is_variable()))
}
