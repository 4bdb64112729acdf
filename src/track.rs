use std::fmt;
use anyhow::{Result, anyhow};

// @module: Subtitle events and canonical tracks

// @struct: Single subtitle event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEvent {
    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Event text, possibly empty
    pub text: String,
}

impl SubtitleEvent {
    /// Creates a new subtitle event - used by loaders, tests and external consumers
    pub fn new(start_ms: u64, end_ms: u64, text: String) -> Self {
        SubtitleEvent {
            start_ms,
            end_ms,
            text,
        }
    }

    // @creates: Validated subtitle event
    // @validates: Time range (end >= start); empty text is allowed
    pub fn new_validated(start_ms: u64, end_ms: u64, text: String) -> Result<Self> {
        if end_ms < start_ms {
            return Err(anyhow!(
                "Invalid time range: end time {} < start time {}",
                end_ms, start_ms
            ));
        }

        Ok(SubtitleEvent {
            start_ms,
            end_ms,
            text: text.trim().to_string(),
        })
    }

    /// Event duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    /// Convert start time to formatted timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_ms)
    }

    /// Convert end time to formatted timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_ms)
    }

    /// Format a timestamp in milliseconds to HH:MM:SS,mmm
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SubtitleEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)
    }
}

/// Canonical ordered subtitle track.
///
/// Events are sorted ascending by start time (stable, so simultaneous cues
/// keep their load order) and empty-text events are dropped unless the track
/// was normalized with `keep_empty` - the reference track keeps them because
/// every reference event must appear in the output.
///
/// A `Track` is never mutated after normalization; the matcher only reads it.
#[derive(Debug, Clone)]
pub struct Track {
    /// Ordered events
    events: Vec<SubtitleEvent>,

    /// Longest observed event duration, a pruning hint for matching
    longest_event_ms: u64,
}

impl Track {
    /// Build a canonical track from an unordered collection of events.
    ///
    /// No error conditions; an empty input yields an empty track. Applying
    /// this to an already-canonical track yields the same track.
    pub fn normalize(events: Vec<SubtitleEvent>, keep_empty: bool) -> Self {
        let mut events: Vec<SubtitleEvent> = events
            .into_iter()
            .filter(|event| keep_empty || !event.text.is_empty())
            .collect();

        // Stable sort keeps load order for simultaneous cues
        events.sort_by_key(|event| event.start_ms);

        let longest_event_ms = events
            .iter()
            .map(|event| event.duration_ms())
            .max()
            .unwrap_or(0);

        Track {
            events,
            longest_event_ms,
        }
    }

    /// The ordered events of this track
    pub fn events(&self) -> &[SubtitleEvent] {
        &self.events
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the track holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Longest observed event duration in milliseconds
    pub fn longest_event_ms(&self) -> u64 {
        self.longest_event_ms
    }

    /// Iterate the events in order
    pub fn iter(&self) -> std::slice::Iter<'_, SubtitleEvent> {
        self.events.iter()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Track")?;
        writeln!(f, "Events: {}", self.events.len())?;
        writeln!(f, "Longest event: {} ms", self.longest_event_ms)?;
        Ok(())
    }
}
