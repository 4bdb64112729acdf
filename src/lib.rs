/*!
 * # jimakudeck
 *
 * A Rust library for aligning several subtitle tracks of the same video
 * into one consolidated set of flashcard-ready records.
 *
 * ## Features
 *
 * - Normalize loader output into canonical, time-ordered tracks
 * - Match secondary-track lines to the reference timeline by temporal overlap
 * - Issue collision-free timestamp keys under a bounded fudge budget
 * - Degrade gracefully when an optional track fails to load
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `track`: Subtitle events and canonical tracks
 * - `alignment`: The track alignment engine:
 *   - `alignment::allocator`: Timestamp-uniqueness allocation
 *   - `alignment::matcher`: Temporal matching of secondary tracks
 *   - `alignment::assembler`: Output record assembly
 * - `subtitle_loader`: Loader adapter boundary and the SRT adapter
 * - `export`: Export boundary towards the deck/collection sink
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod export;
pub mod subtitle_loader;
pub mod track;

// Re-export main types for easier usage
pub use alignment::{assemble, AlignmentRecord, Role, TimestampRegistry, TrackMatcher};
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use errors::{AlignError, AppError, LoaderError};
pub use export::{JsonLinesSink, RecordSink};
pub use subtitle_loader::{SrtLoader, SubtitleLoader};
pub use track::{SubtitleEvent, Track};
