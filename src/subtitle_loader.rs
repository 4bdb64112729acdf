use std::fs;
use std::path::Path;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::LoaderError;
use crate::track::SubtitleEvent;

// @module: Subtitle loader adapter

// @const: SRT timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2}):(\d{2}):(\d{2}),(\d{3})").unwrap()
});

/// Boundary to the subtitle file world.
///
/// Yields an unordered collection of time-stamped text events for a file;
/// the engine never sees format specifics behind this contract. Event text
/// may be empty, order is not guaranteed - normalization handles both.
pub trait SubtitleLoader {
    /// Load all events from `path`, decoding with `encoding_hint` when the
    /// content is not valid UTF-8.
    fn load(&self, path: &Path, encoding_hint: &str) -> Result<Vec<SubtitleEvent>, LoaderError>;
}

/// Loader for SubRip (.srt) files.
#[derive(Debug, Default, Clone, Copy)]
pub struct SrtLoader;

impl SrtLoader {
    /// Decode raw bytes, trying strict UTF-8 first, then the hint encoding,
    /// finally falling back to lossy UTF-8 with replacement characters.
    ///
    /// The lossy step is an accepted degradation: for secondary tracks a few
    /// mangled characters beat losing the whole track.
    fn decode(bytes: Vec<u8>, encoding_hint: &str, path: &Path) -> Result<String, LoaderError> {
        match String::from_utf8(bytes) {
            Ok(content) => Ok(content),
            Err(err) => {
                let bytes = err.into_bytes();
                match encoding_hint.to_lowercase().as_str() {
                    "utf-8" | "utf8" => {
                        warn!(
                            "File {} is not valid UTF-8, decoding with replacement characters",
                            path.display()
                        );
                        Ok(String::from_utf8_lossy(&bytes).into_owned())
                    }
                    "latin-1" | "latin1" | "iso-8859-1" => {
                        debug!(
                            "File {} is not valid UTF-8, decoding as {}",
                            path.display(),
                            encoding_hint
                        );
                        // Latin-1 maps bytes to the first 256 code points
                        Ok(bytes.iter().map(|&b| b as char).collect())
                    }
                    other => Err(LoaderError::UnsupportedEncoding(other.to_string())),
                }
            }
        }
    }

    /// Parse SRT content into subtitle events.
    ///
    /// Cues with an invalid time range are skipped with a warning; cues with
    /// empty text are kept, the normalizer decides whether to drop them.
    fn parse_srt_string(content: &str, path: &Path) -> Result<Vec<SubtitleEvent>, LoaderError> {
        let mut events = Vec::new();

        // State variables for parsing
        let mut current_start_ms: Option<u64> = None;
        let mut current_end_ms: Option<u64> = None;
        let mut pending_seq = false;
        let mut current_text = String::new();
        let mut line_count = 0;

        let finalize =
            |start_ms: u64, end_ms: u64, text: &str, events: &mut Vec<SubtitleEvent>| {
                match SubtitleEvent::new_validated(start_ms, end_ms, text.to_string()) {
                    Ok(event) => events.push(event),
                    Err(e) => warn!("Skipping invalid subtitle cue in {}: {}", path.display(), e),
                }
            };

        for line in content.lines() {
            line_count += 1;
            let trimmed = line.trim().trim_start_matches('\u{feff}');

            // A blank line closes the current cue
            if trimmed.is_empty() {
                if let (Some(start_ms), Some(end_ms)) = (current_start_ms, current_end_ms) {
                    finalize(start_ms, end_ms, &current_text, &mut events);
                }
                current_start_ms = None;
                current_end_ms = None;
                pending_seq = false;
                current_text.clear();
                continue;
            }

            // Sequence number only opens a new cue
            if !pending_seq && current_start_ms.is_none() && trimmed.parse::<usize>().is_ok() {
                pending_seq = true;
                continue;
            }

            // Timestamp line
            if current_start_ms.is_none() {
                if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                    current_start_ms = Some(Self::timestamp_to_ms(&caps, 1));
                    current_end_ms = Some(Self::timestamp_to_ms(&caps, 5));
                    continue;
                }
                warn!(
                    "Unexpected line {} in {} before a timestamp: {}",
                    line_count,
                    path.display(),
                    trimmed
                );
                continue;
            }

            // Everything after the timestamps is cue text
            if !current_text.is_empty() {
                current_text.push('\n');
            }
            current_text.push_str(trimmed);
        }

        // Close the last cue if the file does not end with a blank line
        if let (Some(start_ms), Some(end_ms)) = (current_start_ms, current_end_ms) {
            finalize(start_ms, end_ms, &current_text, &mut events);
        }

        if events.is_empty() {
            warn!("No valid subtitle cues found in {}", path.display());
            return Err(LoaderError::NoCues(path.to_path_buf()));
        }

        Ok(events)
    }

    /// Convert a captured timestamp to milliseconds
    fn timestamp_to_ms(caps: &regex::Captures, start_idx: usize) -> u64 {
        let hours: u64 = caps
            .get(start_idx)
            .map_or(0, |m| m.as_str().parse().unwrap_or(0));
        let minutes: u64 = caps
            .get(start_idx + 1)
            .map_or(0, |m| m.as_str().parse().unwrap_or(0));
        let seconds: u64 = caps
            .get(start_idx + 2)
            .map_or(0, |m| m.as_str().parse().unwrap_or(0));
        let millis: u64 = caps
            .get(start_idx + 3)
            .map_or(0, |m| m.as_str().parse().unwrap_or(0));

        (hours * 3600 + minutes * 60 + seconds) * 1000 + millis
    }
}

impl SubtitleLoader for SrtLoader {
    fn load(&self, path: &Path, encoding_hint: &str) -> Result<Vec<SubtitleEvent>, LoaderError> {
        let bytes = fs::read(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let content = Self::decode(bytes, encoding_hint, path)?;
        let events = Self::parse_srt_string(&content, path)?;

        debug!("Loaded {} cue(s) from {}", events.len(), path.display());
        Ok(events)
    }
}
