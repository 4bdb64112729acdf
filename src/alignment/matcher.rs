use crate::track::Track;

// @module: Temporal matching of secondary tracks against the reference timeline

/// Matcher over one secondary track.
///
/// Holds a cursor into the sorted track so that consecutive reference events,
/// which arrive in ascending start order, resume the scan where the previous
/// one left off instead of restarting from the front. Combined with the
/// track's longest-event hint this keeps a full alignment pass near-linear.
#[derive(Debug)]
pub struct TrackMatcher<'a> {
    /// The normalized secondary track, read-only
    track: &'a Track,

    /// Lower bound for the next scan; events before it cannot overlap
    /// the current or any later reference event
    cursor: usize,
}

impl<'a> TrackMatcher<'a> {
    /// Create a matcher positioned at the start of the track
    pub fn new(track: &'a Track) -> Self {
        TrackMatcher { track, cursor: 0 }
    }

    /// Find the text of the event that best overlaps `[start_ms, end_ms)`.
    ///
    /// Only events with a non-zero overlap qualify; among those the event
    /// minimizing `|cand.start - start| + |cand.end - end|` wins, earliest
    /// start on a tie. Returns `None` when nothing overlaps - proximity
    /// alone is never enough.
    ///
    /// Reference events must be supplied in ascending start order; the
    /// cursor advance relies on it.
    pub fn match_event(&mut self, start_ms: u64, end_ms: u64) -> Option<&'a str> {
        let events = self.track.events();

        // Events starting before this horizon end before the reference
        // starts, whatever their duration.
        let horizon = start_ms.saturating_sub(self.track.longest_event_ms());
        self.cursor += events[self.cursor..].partition_point(|e| e.start_ms < horizon);

        // Events ending at or before the reference start are dead for this
        // and every later reference event.
        while self.cursor < events.len() && events[self.cursor].end_ms <= start_ms {
            self.cursor += 1;
        }

        let mut best: Option<(u64, &'a str)> = None;
        for event in &events[self.cursor..] {
            if event.start_ms >= end_ms {
                // Sorted by start: nothing further can overlap
                break;
            }
            let overlap_start = event.start_ms.max(start_ms);
            let overlap_end = event.end_ms.min(end_ms);
            if overlap_end <= overlap_start {
                continue;
            }

            let distance =
                event.start_ms.abs_diff(start_ms) + event.end_ms.abs_diff(end_ms);
            let closer = match best {
                Some((best_distance, _)) => distance < best_distance,
                None => true,
            };
            if closer {
                best = Some((distance, event.text.as_str()));
            }
        }

        best.map(|(_, text)| text)
    }
}
