use std::collections::HashSet;
use rand::Rng;

use crate::track::SubtitleEvent;

// @module: Timestamp-uniqueness allocation

/// Default perturbation budget in milliseconds
pub const DEFAULT_FUDGE_BUDGET_MS: u64 = 500;

/// A key issued by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedKey {
    // @field: Rendered timestamp key
    pub key: String,

    // @field: Whether the key came from the non-registered fallback path
    pub is_fallback: bool,
}

/// Run-scoped registry of issued timestamp keys.
///
/// Two cues frequently start on the same millisecond, so the nominal start
/// time alone cannot serve as a record key. The registry shifts a candidate
/// start forward one millisecond at a time, up to the fudge budget, until it
/// finds a rendering it has not issued before.
///
/// The registry only grows and has a single writer: `allocate` must be
/// called exactly once per reference event, in ascending start order, so
/// that it reflects only earlier events. A later event must never steal a
/// key an earlier event needed.
#[derive(Debug)]
pub struct TimestampRegistry {
    /// Rendered keys issued so far
    issued: HashSet<String>,

    /// Maximum shift applied to a candidate start, in ms
    fudge_budget_ms: u64,
}

impl TimestampRegistry {
    /// Create a registry with the given fudge budget
    pub fn new(fudge_budget_ms: u64) -> Self {
        TimestampRegistry {
            issued: HashSet::new(),
            fudge_budget_ms,
        }
    }

    /// Issue a key for an event nominally starting at `candidate_start_ms`.
    ///
    /// Tries `candidate + delta` for `delta = 0..=budget`; the first
    /// rendering not seen before is recorded and returned. When every trial
    /// collides the last rendering gets a random decimal suffix and is
    /// returned without being recorded - a degraded escape hatch that loses
    /// the uniqueness guarantee, which the caller must surface as a warning.
    pub fn allocate(&mut self, candidate_start_ms: u64) -> AllocatedKey {
        for delta in 0..=self.fudge_budget_ms {
            let key = SubtitleEvent::format_timestamp(candidate_start_ms + delta);
            if !self.issued.contains(&key) {
                self.issued.insert(key.clone());
                return AllocatedKey {
                    key,
                    is_fallback: false,
                };
            }
        }

        // Don't shift further than the budget. Append a random decimal
        // suffix to the last trial instead and hope for the best.
        let last = SubtitleEvent::format_timestamp(candidate_start_ms + self.fudge_budget_ms);
        let suffix: u32 = rand::rng().random_range(100_000_000..1_000_000_000);
        AllocatedKey {
            key: format!("{}{}", last, suffix),
            is_fallback: true,
        }
    }

    /// Whether a rendered key has been issued
    pub fn contains(&self, key: &str) -> bool {
        self.issued.contains(key)
    }

    /// Number of keys issued so far
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    /// Whether no key has been issued yet
    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    /// The configured fudge budget in ms
    pub fn fudge_budget_ms(&self) -> u64 {
        self.fudge_budget_ms
    }
}

impl Default for TimestampRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_FUDGE_BUDGET_MS)
    }
}
