use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::alignment::{Role, DEFAULT_FUDGE_BUDGET_MS};
use crate::errors::AlignError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Subtitle files to align, reference plus secondaries
    pub subtitle_files: Vec<PathBuf>,

    /// Which entry of `subtitle_files` is the reference track
    #[serde(default)]
    pub reference_index: usize,

    /// Maximum perturbation applied to a start time while searching
    /// for an unused key, in milliseconds
    #[serde(default = "default_fudge_budget_ms")]
    pub fudge_budget_ms: u64,

    /// Encoding tried when a file is not valid UTF-8
    #[serde(default = "default_encoding")]
    pub default_encoding: String,

    /// Role labels for the secondary tracks, in file order with the
    /// reference skipped
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Config {
    /// Validate the configuration.
    ///
    /// Role labels outside the recognized set are rejected here, at
    /// configuration time, rather than ignored while filling records.
    pub fn validate(&self) -> Result<()> {
        if self.subtitle_files.is_empty() {
            return Err(anyhow!("At least one subtitle file must be configured"));
        }

        if self.reference_index >= self.subtitle_files.len() {
            return Err(AlignError::ReferenceOutOfRange {
                index: self.reference_index,
                count: self.subtitle_files.len(),
            }
            .into());
        }

        match self.default_encoding.to_lowercase().as_str() {
            "utf-8" | "utf8" | "latin-1" | "latin1" | "iso-8859-1" => {}
            other => return Err(anyhow!("Unsupported default encoding: {}", other)),
        }

        // Resolves labels and checks count/duplicates
        self.secondary_roles()?;

        Ok(())
    }

    /// Resolve the configured labels into roles, one per secondary track.
    pub fn secondary_roles(&self) -> Result<Vec<Role>> {
        let secondary_count = self.subtitle_files.len().saturating_sub(1);
        if self.roles.len() != secondary_count {
            return Err(AlignError::RoleCountMismatch {
                expected: secondary_count,
                actual: self.roles.len(),
            }
            .into());
        }

        let mut roles = Vec::with_capacity(self.roles.len());
        for label in &self.roles {
            let role = Role::from_str(label)?;
            if roles.contains(&role) {
                return Err(AlignError::DuplicateRole(role.to_string()).into());
            }
            roles.push(role);
        }

        Ok(roles)
    }

    /// Path of the reference track
    pub fn reference_file(&self) -> &PathBuf {
        &self.subtitle_files[self.reference_index]
    }

    /// Paths of the secondary tracks, in file order
    pub fn secondary_files(&self) -> Vec<&PathBuf> {
        self.subtitle_files
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != self.reference_index)
            .map(|(_, path)| path)
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subtitle_files: Vec::new(),
            reference_index: 0,
            fudge_budget_ms: default_fudge_budget_ms(),
            default_encoding: default_encoding(),
            roles: default_roles(),
            log_level: LogLevel::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_fudge_budget_ms() -> u64 {
    DEFAULT_FUDGE_BUDGET_MS
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_roles() -> Vec<String> {
    vec!["Expression".to_string(), "Meaning".to_string()]
}
