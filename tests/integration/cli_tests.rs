//! File-level and command-line tests.
//!
//! Tests verify:
//! - `dump_path` reads real files in text and JSON formats
//! - A missing file is an open error
//! - The binary exits 0 on success and 1 on any error, usage errors included

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value as Json;
use tempfile::NamedTempFile;

use tiff_metadata::{dump_path, DecodeOptions, FormatError, IoError, OutputFormat};

use super::test_utils::{minimal_tiff, tiff_with_exif, wrap_in_jpeg, ByteOrderType};

fn temp_file(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

fn run_binary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tiff-metadata"))
        .args(args)
        .env_remove("TIFF_METADATA_FORMAT")
        .env_remove("TIFF_METADATA_NO_EXIF")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

// =============================================================================
// dump_path
// =============================================================================

#[test]
fn test_dump_path_text() {
    let file = temp_file(&minimal_tiff(ByteOrderType::LittleEndian));
    let mut out = Vec::new();

    let summary = dump_path(file.path(), OutputFormat::Text, DecodeOptions::default(), &mut out)
        .unwrap();

    assert_eq!(summary.primary_ifds, 1);
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Intel (little-endian) byte order\nMagic 42\n"));
    assert!(text.ends_with("End of IFD list\n"));
}

#[test]
fn test_dump_path_json() {
    let file = temp_file(&wrap_in_jpeg(&tiff_with_exif(ByteOrderType::BigEndian)));
    let mut out = Vec::new();

    dump_path(file.path(), OutputFormat::Json, DecodeOptions::default(), &mut out).unwrap();

    let records: Vec<Json> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["type"], "header");
    assert_eq!(records[0]["container"], "jpeg");
    assert_eq!(records[0]["tiff_base"], 12);
    assert_eq!(records[0]["byte_order"], "Motorola (big-endian)");

    assert_eq!(records[1]["kind"], "primary");
    assert_eq!(records[1]["offset"], 8);
    assert_eq!(records[1]["entries"][0]["tag_name"], "ImageWidth");
    assert_eq!(records[1]["entries"][0]["values"][0]["value"], 640);
    assert_eq!(records[1]["entries"][2]["text"], "Canon");

    let exif = &records[2];
    assert_eq!(exif["kind"], "exif");
    assert_eq!(exif["offset"], 68);
    assert_eq!(exif["entries"][0]["values"][0]["value"]["denominator"], 250);
    assert_eq!(exif["entries"][2]["hex"], "30323330");
    assert_eq!(exif["next_ifd_offset"], 0);
}

#[test]
fn test_dump_path_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.tif");
    let mut out = Vec::new();

    let err = dump_path(&path, OutputFormat::Text, DecodeOptions::default(), &mut out).unwrap_err();
    assert!(matches!(err, FormatError::Io(IoError::Open { .. })));
    assert!(err.to_string().contains("can't open"));
    assert!(out.is_empty());
}

// =============================================================================
// Binary
// =============================================================================

#[test]
fn test_binary_success() {
    let file = temp_file(&tiff_with_exif(ByteOrderType::LittleEndian));
    let output = run_binary(&[path_str(file.path())]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\nExif header\n"));
}

#[test]
fn test_binary_no_exif_flag() {
    let file = temp_file(&tiff_with_exif(ByteOrderType::LittleEndian));
    let output = run_binary(&["--no-exif", path_str(file.path())]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("Exif header"));
}

#[test]
fn test_binary_error_exit_code() {
    let file = temp_file(b"not an image at all");
    let output = run_binary(&[path_str(file.path())]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unsupported file type"));
}

#[test]
fn test_binary_jpeg_without_exif() {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    data.extend_from_slice(b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0");
    let file = temp_file(&data);
    let output = run_binary(&[path_str(file.path())]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "JPEG file\n");
    assert!(String::from_utf8(output.stderr).unwrap().contains("Exif header"));
}

#[test]
fn test_binary_partial_output_on_truncation() {
    let mut data = minimal_tiff(ByteOrderType::BigEndian);
    data.truncate(12);
    let file = temp_file(&data);
    let output = run_binary(&[path_str(file.path())]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.ends_with("number of IFD entries 1\n"));
    assert!(String::from_utf8(output.stderr).unwrap().contains("short read"));
}

#[test]
fn test_binary_usage_errors() {
    assert_eq!(run_binary(&[]).status.code(), Some(1));
    assert_eq!(run_binary(&["a.tif", "b.tif"]).status.code(), Some(1));
    assert_eq!(run_binary(&["--help"]).status.code(), Some(0));
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}
