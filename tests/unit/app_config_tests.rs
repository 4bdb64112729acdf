/*!
 * Tests for application configuration
 */

use std::path::PathBuf;

use jimakudeck::alignment::Role;
use jimakudeck::app_config::{Config, LogLevel};

fn config_with_files(files: &[&str], roles: &[&str]) -> Config {
    Config {
        subtitle_files: files.iter().map(PathBuf::from).collect(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        ..Config::default()
    }
}

#[test]
fn test_config_default_shouldUseDocumentedDefaults() {
    let config = Config::default();

    assert_eq!(config.reference_index, 0);
    assert_eq!(config.fudge_budget_ms, 500);
    assert_eq!(config.default_encoding, "utf-8");
    assert_eq!(config.roles, vec!["Expression", "Meaning"]);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_validate_withValidConfig_shouldSucceed() {
    let config = config_with_files(&["ja.srt", "en.srt", "read.srt"], &["Meaning", "Reading"]);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withNoFiles_shouldFail() {
    let config = config_with_files(&[], &[]);
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withReferenceIndexOutOfRange_shouldFail() {
    let mut config = config_with_files(&["ja.srt", "en.srt"], &["Meaning"]);
    config.reference_index = 2;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withUnknownRole_shouldFail() {
    let config = config_with_files(&["ja.srt", "en.srt"], &["Gloss"]);
    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("Gloss"));
}

#[test]
fn test_validate_withDuplicateRole_shouldFail() {
    let config = config_with_files(
        &["ja.srt", "en.srt", "de.srt"],
        &["Meaning", "Meaning"],
    );
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withRoleCountMismatch_shouldFail() {
    let config = config_with_files(&["ja.srt", "en.srt", "de.srt"], &["Meaning"]);
    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("role label"));
}

#[test]
fn test_validate_withUnsupportedEncoding_shouldFail() {
    let mut config = config_with_files(&["ja.srt", "en.srt"], &["Meaning"]);
    config.default_encoding = "shift-jis".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withLatin1Encoding_shouldSucceed() {
    let mut config = config_with_files(&["ja.srt", "en.srt"], &["Meaning"]);
    config.default_encoding = "ISO-8859-1".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_secondaryRoles_withValidLabels_shouldResolveInFileOrder() {
    let config = config_with_files(
        &["ja.srt", "en.srt", "read.srt"],
        &["Meaning", "Reading"],
    );
    let roles = config.secondary_roles().unwrap();
    assert_eq!(roles, vec![Role::Meaning, Role::Reading]);
}

#[test]
fn test_referenceFile_withNonZeroIndex_shouldSelectConfiguredFile() {
    let mut config = config_with_files(&["en.srt", "ja.srt"], &["Meaning"]);
    config.reference_index = 1;

    assert_eq!(config.reference_file(), &PathBuf::from("ja.srt"));
    let secondaries = config.secondary_files();
    assert_eq!(secondaries, vec![&PathBuf::from("en.srt")]);
}

#[test]
fn test_config_serde_shouldRoundTripThroughJson() {
    let config = config_with_files(&["ja.srt", "en.srt"], &["Meaning"]);

    let json = serde_json::to_string(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.subtitle_files, config.subtitle_files);
    assert_eq!(parsed.roles, config.roles);
    assert_eq!(parsed.fudge_budget_ms, config.fudge_budget_ms);
}

#[test]
fn test_config_serde_withMissingOptionalFields_shouldApplyDefaults() {
    let json = r#"{ "subtitle_files": ["ja.srt", "en.srt"], "roles": ["Meaning"] }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.reference_index, 0);
    assert_eq!(config.fudge_budget_ms, 500);
    assert_eq!(config.default_encoding, "utf-8");
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}
