use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::alignment::{assemble, Role, TimestampRegistry};
use crate::app_config::Config;
use crate::export::{record_fields, RecordSink};
use crate::subtitle_loader::SubtitleLoader;
use crate::track::Track;

// @module: Application controller for track alignment

/// Outcome summary of one alignment run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    // @field: Number of records handed to the sink
    pub records: usize,

    // @field: Number of records whose key took the fallback path
    pub fallback_keys: usize,

    // @field: Secondary tracks that failed to load and were excluded
    pub dropped_tracks: Vec<PathBuf>,
}

/// Main application controller for subtitle track alignment
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Run the whole pipeline: load, normalize, align, hand off to the sink.
    ///
    /// The reference track must load - without it there is no timeline and
    /// the run fails. A secondary track that fails to load is logged and
    /// excluded; the run continues with one fewer source of text.
    pub fn run(
        &self,
        loader: &dyn SubtitleLoader,
        sink: &mut dyn RecordSink,
    ) -> Result<RunSummary> {
        let encoding = &self.config.default_encoding;
        let roles = self.config.secondary_roles()?;

        // Crash-and-burn if we can't load the reference subtitles
        let reference_path = self.config.reference_file();
        let reference_events = loader
            .load(reference_path, encoding)
            .with_context(|| {
                format!(
                    "Failed to load reference track: {}",
                    reference_path.display()
                )
            })?;
        let reference = Track::normalize(reference_events, true);
        info!(
            "Reference track {}: {} event(s)",
            reference_path.display(),
            reference.len()
        );

        let mut dropped_tracks = Vec::new();
        let mut secondaries: Vec<(Role, Track)> = Vec::new();
        for (path, role) in self.config.secondary_files().iter().zip(roles) {
            match loader.load(path, encoding) {
                Ok(events) => {
                    let track = Track::normalize(events, false);
                    debug!(
                        "Secondary track {} ({}): {} event(s)",
                        path.display(),
                        role,
                        track.len()
                    );
                    secondaries.push((role, track));
                }
                Err(e) => {
                    warn!(
                        "Can't load subtitles from file {}, dropping {} track: {}",
                        path.display(),
                        role,
                        e
                    );
                    dropped_tracks.push((*path).clone());
                }
            }
        }

        let mut registry = TimestampRegistry::new(self.config.fudge_budget_ms);
        let records = assemble(&reference, &secondaries, &mut registry);

        let mut fallback_keys = 0;
        for record in &records {
            if record.key_is_fallback {
                fallback_keys += 1;
                warn!(
                    "Key for event at {} ms exhausted the fudge budget; \
                     falling back to a random suffix, uniqueness is not guaranteed",
                    record.start_ms
                );
            }
            sink.accept(&record_fields(record))
                .context("Export sink rejected a record")?;
        }

        info!(
            "Aligned {} record(s) from {} secondary track(s)",
            records.len(),
            secondaries.len()
        );

        Ok(RunSummary {
            records: records.len(),
            fallback_keys,
            dropped_tracks,
        })
    }
}
