//! Integration tests for the convert pipeline.
//!
//! Tests that need a real TrueType font use DejaVu Sans from the system font
//! folder and return early when it is not installed.

use std::fs;
use std::path::{Path, PathBuf};

use bmh_cli::commands::convert;
use bmh_cli::config::{CharsetSource, ConvertConfig};
use bmh_cli::fonts;
use bmh_export::{FontMetadata, LOG_FILE_NAME};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const DEJAVU_SANS: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

fn font_folder_with_dejavu() -> Option<TempDir> {
    let source = Path::new(DEJAVU_SANS);
    if !source.exists() {
        println!("DejaVu Sans not installed, skipping test");
        return None;
    }
    let dir = tempfile::tempdir().unwrap();
    fs::copy(source, dir.path().join("DejaVuSans.ttf")).unwrap();
    Some(dir)
}

fn config(font_folder: &Path, output_folder: &Path) -> ConvertConfig {
    ConvertConfig {
        ttf_folder: Some(font_folder.to_path_buf()),
        output_folder: output_folder.to_path_buf(),
        fontsizes: vec![16],
        ..Default::default()
    }
}

#[test]
fn test_config_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bmh.json");
    fs::write(
        &path,
        r#"{
            "fontsizes": [8, 16],
            "charset": {"characters": "AB"},
            "policy": {"variable_width": true, "orientation": "rotated"},
            "header": {"dialect": "uint8", "byte_format": "hex"}
        }"#,
    )
    .unwrap();

    let config = ConvertConfig::load(&path).unwrap();
    assert_eq!(config.fontsizes, vec![8, 16]);
    assert_eq!(config.charset, CharsetSource::Characters("AB".to_string()));
    assert!(config.policy.variable_width);
    assert_eq!(config.output_folder, PathBuf::from("bmh_fonts"));
}

#[test]
fn test_config_file_with_bad_policy_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bmh.json");
    fs::write(&path, r#"{"policy": {"orientation": "diagonal"}}"#).unwrap();
    assert!(ConvertConfig::load(&path).is_err());
}

#[test]
fn test_scan_skips_unreadable_fonts() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.ttf"), b"definitely not a font").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

    let scan = fonts::scan(dir.path()).unwrap();
    assert!(scan.fonts.is_empty());
    assert_eq!(scan.skipped.len(), 1);
    assert!(scan.skipped[0].path.ends_with("broken.ttf"));
}

#[test]
fn test_convert_without_fonts_fails() {
    let fonts = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    assert!(convert::run(&config(fonts.path(), out.path())).is_err());
}

#[test]
fn test_convert_unknown_font_name_fails() {
    let Some(fonts) = font_folder_with_dejavu() else {
        return;
    };
    let out = tempfile::tempdir().unwrap();
    let mut config = config(fonts.path(), out.path());
    config.font = Some("No Such Font".to_string());
    assert!(convert::run(&config).is_err());
}

#[test]
fn test_convert_digits_variable_width() {
    let Some(fonts) = font_folder_with_dejavu() else {
        return;
    };
    let out = tempfile::tempdir().unwrap();
    let mut config = config(fonts.path(), out.path());
    config.policy.variable_width = true;

    convert::run(&config).unwrap();

    let font_dir = out.path().join("DejaVu Sans");
    let header = fs::read_to_string(font_dir.join("DejaVu Sans_16.h")).unwrap();
    assert!(header.starts_with("// Header File for SSD1306 characters\n"));
    assert!(header.contains("// Font Size: 16 * variable\n"));
    assert!(header.contains("const char bitmap_48[]"));
    assert!(header.contains("const char bitmap_58[]"));
    assert!(header.contains("const char* char_addr[]"));
    assert!(font_dir.join("DejaVu Sans_16.png").exists());

    let metadata: FontMetadata =
        serde_json::from_str(&fs::read_to_string(font_dir.join("DejaVu Sans_16.json")).unwrap()).unwrap();
    assert_eq!(metadata.glyphs.len(), 11);
    assert_eq!(metadata.glyphs[10].character, ":");
    assert!(metadata.glyphs.iter().all(|g| g.width > 0 && g.width <= 12));
    assert!(metadata.glyphs[10].width < metadata.glyphs[0].width);

    let log = fs::read_to_string(out.path().join(LOG_FILE_NAME)).unwrap();
    let hash = metadata.header_hash.unwrap();
    assert!(log.contains(&format!("DejaVu Sans_16.h {}", hash)));
}

#[test]
fn test_convert_is_deterministic() {
    let Some(fonts) = font_folder_with_dejavu() else {
        return;
    };
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    for out in [&first, &second] {
        let mut config = config(fonts.path(), out.path());
        config.charset = CharsetSource::LowerAscii;
        config.policy.orientation = Some("column_major".to_string());
        convert::run(&config).unwrap();
    }

    let read = |dir: &TempDir, name: &str| fs::read(dir.path().join("DejaVu Sans").join(name)).unwrap();
    assert_eq!(read(&first, "DejaVu Sans_16.h"), read(&second, "DejaVu Sans_16.h"));
    assert_eq!(read(&first, "DejaVu Sans_16.png"), read(&second, "DejaVu Sans_16.png"));
}

#[test]
fn test_space_is_blank_full_height() {
    let Some(fonts) = font_folder_with_dejavu() else {
        return;
    };
    let out = tempfile::tempdir().unwrap();
    let mut config = config(fonts.path(), out.path());
    config.charset = CharsetSource::Characters(" 1".to_string());
    config.policy.variable_width = true;
    config.preview = false;

    convert::run(&config).unwrap();

    let font_dir = out.path().join("DejaVu Sans");
    assert!(!font_dir.join("DejaVu Sans_16.png").exists());
    let metadata: FontMetadata =
        serde_json::from_str(&fs::read_to_string(font_dir.join("DejaVu Sans_16.json")).unwrap()).unwrap();
    let space = &metadata.glyphs[0];
    assert_eq!(space.codepoint, 32);
    assert_eq!(space.width, 12);
    assert_eq!(space.height, 16);
    assert_eq!(space.len, 24);
}

#[test]
fn test_variable_height_writes_height_tables() {
    let Some(fonts) = font_folder_with_dejavu() else {
        return;
    };
    let out = tempfile::tempdir().unwrap();
    let mut config = config(fonts.path(), out.path());
    config.charset = CharsetSource::Characters("|".to_string());
    config.policy.variable_height = true;
    config.preview = false;
    config.metadata = false;

    convert::run(&config).unwrap();

    let header = fs::read_to_string(out.path().join("DejaVu Sans").join("DejaVu Sans_16.h")).unwrap();
    assert!(header.contains("const char char_height[] = {"));
    assert!(header.contains("const char char_yoffset[] = {"));
}
