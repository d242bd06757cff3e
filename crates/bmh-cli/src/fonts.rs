//! TrueType font discovery.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ttf_parser::{name_id, Face};
use walkdir::WalkDir;

/// A font file and the full name stored in its `name` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFile {
    /// Location on disk.
    pub path: PathBuf,
    /// Full font name, e.g. `DejaVu Sans Bold`.
    pub name: String,
}

impl FontFile {
    /// Read the font bytes.
    pub fn read(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).with_context(|| format!("Failed to read font: {}", self.path.display()))
    }
}

/// A `.ttf` file that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFont {
    /// Location on disk.
    pub path: PathBuf,
    /// Why the file was skipped.
    pub reason: String,
}

/// Result of scanning a folder.
#[derive(Debug, Clone, Default)]
pub struct FontScan {
    /// Usable fonts sorted by path.
    pub fonts: Vec<FontFile>,
    /// Files that were skipped.
    pub skipped: Vec<SkippedFont>,
}

impl FontScan {
    /// Look up a font by its exact full name.
    pub fn find(&self, name: &str) -> Option<&FontFile> {
        self.fonts.iter().find(|f| f.name == name)
    }

    /// Keep only the font named `name`, or all fonts when `name` is `None`.
    pub fn select(&self, name: Option<&str>) -> Result<Vec<FontFile>> {
        match name {
            Some(name) => match self.find(name) {
                Some(font) => Ok(vec![font.clone()]),
                None => bail!("Font '{}' not found", name),
            },
            None => Ok(self.fonts.clone()),
        }
    }
}

/// Platform font folder.
pub fn default_font_folder() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\Windows\Fonts\")
    } else {
        PathBuf::from("/usr/share/fonts")
    }
}

/// Recursively collect `.ttf` files under `folder`.
pub fn scan(folder: &Path) -> Result<FontScan> {
    if !folder.is_dir() {
        bail!("Font folder does not exist: {}", folder.display());
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(folder)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_ttf(p))
        .collect();
    paths.sort();

    let mut result = FontScan::default();
    for path in paths {
        match read_font_name(&path) {
            Ok(name) => result.fonts.push(FontFile { path, name }),
            Err(e) => result.skipped.push(SkippedFont {
                path,
                reason: format!("{:#}", e),
            }),
        }
    }
    Ok(result)
}

fn is_ttf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ttf"))
}

/// Full font name (name id 4) of a font file.
pub fn read_font_name(path: &Path) -> Result<String> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    font_name_from_bytes(&data)
}

/// Full font name (name id 4) from font bytes, NULs removed.
pub fn font_name_from_bytes(data: &[u8]) -> Result<String> {
    let face = Face::parse(data, 0).map_err(|e| anyhow::anyhow!("Invalid font file: {}", e))?;
    let name = face
        .names()
        .into_iter()
        .filter(|n| n.name_id == name_id::FULL_NAME)
        .find_map(|n| n.to_string())
        .map(|n| n.replace('\0', ""))
        .filter(|n| !n.is_empty());

    match name {
        Some(name) => Ok(name),
        None => bail!("Font has no full name entry"),
    }
}
