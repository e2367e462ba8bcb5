//! retimecore - fix capture times of multi-chunk GoPro recordings
//!
//! GoPro cameras split long recordings into chunks, and the media library can end
//! up with the wrong capture time on every chunk after the first. Given the first
//! chunk's correct start time, this crate derives every later chunk's capture time
//! from the preceding chunks' durations and writes it back through the media API,
//! one paced request per chunk.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging and request pacing
//! - `media`: Chunk parsing, recording grouping, timeline and media sources
//! - `api`: Media update service client and access token handling
//! - `retimestamp`: The paced re-timestamping routine

pub mod api;
pub mod core;
pub mod media;
pub mod retimestamp;

// Re-export commonly used types for convenience
pub use crate::core::{AppError, AppResult, DelayRange, Pacer, Settings};
pub use api::{AccessToken, GoProApiClient, MediaUpdateService};
pub use media::{MediaEntry, MediaSource, RecordingGroup};
pub use retimestamp::{ChunkReport, RetimestampReport, Retimestamper, UpdateOutcome};
