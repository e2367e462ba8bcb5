//! Recording chunks and their capture times
//!
//! - `chunk`: filename and duration parsing
//! - `group`: validation and ordering of one recording's chunks
//! - `timeline`: capture time accumulation
//! - `start_time`: parsing the first chunk's start time
//! - `source`: where the selected chunks come from

mod chunk;
mod group;
mod source;
mod start_time;
mod timeline;

pub use chunk::{ChunkName, ClipDuration, MediaChunk, MediaEntry};
pub use group::RecordingGroup;
pub use source::{LibraryPageSource, ManifestSource, MediaSource};
pub use start_time::{parse_start_time, parse_utc_offset};
pub use timeline::{format_captured_at, PlannedUpdate, Timeline};
