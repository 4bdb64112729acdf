/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;

use jimakudeck::errors::{AlignError, AppError, LoaderError};

#[test]
fn test_loaderError_io_shouldDisplayPathAndSource() {
    let error = LoaderError::Io {
        path: PathBuf::from("missing.srt"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
    };
    let display = format!("{}", error);
    assert!(display.contains("missing.srt"));
    assert!(display.contains("no such file"));
}

#[test]
fn test_loaderError_unsupportedEncoding_shouldDisplayHint() {
    let error = LoaderError::UnsupportedEncoding("shift-jis".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Unsupported encoding"));
    assert!(display.contains("shift-jis"));
}

#[test]
fn test_loaderError_noCues_shouldDisplayPath() {
    let error = LoaderError::NoCues(PathBuf::from("empty.srt"));
    let display = format!("{}", error);
    assert!(display.contains("No valid subtitle cues"));
    assert!(display.contains("empty.srt"));
}

#[test]
fn test_alignError_unknownRole_shouldDisplayLabel() {
    let error = AlignError::UnknownRole("Gloss".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Unrecognized role"));
    assert!(display.contains("Gloss"));
}

#[test]
fn test_alignError_referenceOutOfRange_shouldDisplayIndexAndCount() {
    let error = AlignError::ReferenceOutOfRange { index: 3, count: 2 };
    let display = format!("{}", error);
    assert!(display.contains("3"));
    assert!(display.contains("2"));
}

#[test]
fn test_appError_fromLoaderError_shouldWrapCorrectly() {
    let loader_error = LoaderError::NoCues(PathBuf::from("empty.srt"));
    let app_error: AppError = loader_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Loader error"));
}

#[test]
fn test_appError_fromAlignError_shouldWrapCorrectly() {
    let align_error = AlignError::DuplicateRole("Meaning".to_string());
    let app_error: AppError = align_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Alignment error"));
    assert!(display.contains("Meaning"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhowError_shouldWrapAsUnknown() {
    let anyhow_error = anyhow::anyhow!("something odd");
    let app_error: AppError = anyhow_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Unknown error"));
    assert!(display.contains("something odd"));
}
