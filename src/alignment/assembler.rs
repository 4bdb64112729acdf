use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::alignment::allocator::TimestampRegistry;
use crate::alignment::matcher::TrackMatcher;
use crate::errors::AlignError;
use crate::track::Track;

// @module: Alignment record assembly

/// Semantic field a secondary track's text fills in an output record.
///
/// The set is fixed; labels that do not parse into it are rejected when the
/// configuration is validated, never silently dropped while filling records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    // @role: Dialogue line in the studied language
    Expression,
    // @role: Translation of the dialogue line
    Meaning,
    // @role: Phonetic reading
    Reading,
    // @role: Still image reference
    Image,
    // @role: Video clip reference
    Video,
    // @role: Audio clip reference
    Audio,
}

impl Role {
    // @returns: Capitalized field label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expression => "Expression",
            Self::Meaning => "Meaning",
            Self::Reading => "Reading",
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Audio => "Audio",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Role {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expression" => Ok(Self::Expression),
            "meaning" => Ok(Self::Meaning),
            "reading" => Ok(Self::Reading),
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            _ => Err(AlignError::UnknownRole(s.to_string())),
        }
    }
}

/// One aligned output record per reference-track event.
///
/// Created once by `assemble` and never mutated afterward; the export
/// collaborator consumes it read-only.
#[derive(Debug, Clone)]
pub struct AlignmentRecord {
    /// Unique rendered timestamp key (barring the fallback escape hatch)
    pub key: String,

    /// Reference event start in ms
    pub start_ms: u64,

    /// Reference event end in ms
    pub end_ms: u64,

    /// Matched text per role; absent roles mean no secondary line overlapped
    pub fields: BTreeMap<Role, String>,

    /// Whether the key came from the allocator's non-unique fallback
    pub key_is_fallback: bool,
}

/// Merge the reference track and all secondary tracks into output records.
///
/// Iterates the reference track in order, allocating a key for each event
/// and matching it against every secondary track. Guarantees: one record per
/// reference event, record order equals reference order, keys pairwise
/// distinct unless `key_is_fallback` is set.
pub fn assemble(
    reference: &Track,
    secondaries: &[(Role, Track)],
    registry: &mut TimestampRegistry,
) -> Vec<AlignmentRecord> {
    let mut matchers: Vec<(Role, TrackMatcher)> = secondaries
        .iter()
        .map(|(role, track)| (*role, TrackMatcher::new(track)))
        .collect();

    let mut records = Vec::with_capacity(reference.len());
    for event in reference.iter() {
        let allocated = registry.allocate(event.start_ms);

        let mut fields = BTreeMap::new();
        for (role, matcher) in matchers.iter_mut() {
            if let Some(text) = matcher.match_event(event.start_ms, event.end_ms) {
                fields.insert(*role, text.to_string());
            }
        }

        records.push(AlignmentRecord {
            key: allocated.key,
            start_ms: event.start_ms,
            end_ms: event.end_ms,
            fields,
            key_is_fallback: allocated.is_fallback,
        });
    }

    records
}
