use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{Context, Result};

use crate::alignment::AlignmentRecord;
use crate::track::SubtitleEvent;

// @module: Export boundary towards the deck/collection sink

/// Field label for the start/key column
pub const START_LABEL: &str = "Start";

/// Field label for the end column
pub const END_LABEL: &str = "End";

/// Sink that receives one aligned record at a time as a field mapping.
///
/// The mapping always carries `Start` (the unique key, which doubles as the
/// rendered start time) and `End`; role labels appear only when a secondary
/// line overlapped, absent roles are simply omitted.
pub trait RecordSink {
    /// Accept one record's field mapping
    fn accept(&mut self, fields: &BTreeMap<String, String>) -> Result<()>;
}

/// Render a record into the field mapping the sink contract expects
pub fn record_fields(record: &AlignmentRecord) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    fields.insert(START_LABEL.to_string(), record.key.clone());
    fields.insert(
        END_LABEL.to_string(),
        SubtitleEvent::format_timestamp(record.end_ms),
    );
    for (role, text) in &record.fields {
        fields.insert(role.label().to_string(), text.clone());
    }
    fields
}

/// Sink writing one JSON object per line to any writer.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Create a sink over the given writer
    pub fn new(writer: W) -> Self {
        JsonLinesSink { writer }
    }

    /// Consume the sink and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn accept(&mut self, fields: &BTreeMap<String, String>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, fields)
            .context("Failed to serialize record to JSON")?;
        writeln!(self.writer).context("Failed to write record")?;
        Ok(())
    }
}
