/*!
 * Track alignment engine.
 *
 * Aligns the events of secondary subtitle tracks against the reference
 * track's timeline and issues a collision-free timestamp key per reference
 * event:
 * - `allocator`: timestamp-uniqueness registry with a bounded fudge budget
 * - `matcher`: overlap-based matching of one secondary track
 * - `assembler`: merges keys and matched text into output records
 */

pub mod allocator;
pub mod assembler;
pub mod matcher;

pub use allocator::{AllocatedKey, TimestampRegistry, DEFAULT_FUDGE_BUDGET_MS};
pub use assembler::{assemble, AlignmentRecord, Role};
pub use matcher::TrackMatcher;
