//! Chunk filename and clip duration parsing
//!
//! GoPro splits long recordings into chunks named `GX<chunk><group>.MP4`:
//! - `GX010005.MP4` - first chunk of recording 5
//! - `GX020005.MP4` - second chunk of recording 5
//!
//! The media library shows each clip's length as `minutes:seconds`.

use chrono::TimeDelta;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::ParseError;

/// `G` + encoding letter (X = HEVC, H = AVC), two-digit chunk index, group id, `.MP4`
static CHUNK_FILENAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^G[XH](\d{2})(\d+)\.(?i:mp4)$").unwrap());

/// `minutes:seconds`, minutes unbounded, seconds two digits
static DURATION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+):(\d{2})$").unwrap());

/// One selected media item, exactly as the media source reported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntry {
    /// Opaque id used by the media API
    pub id: String,
    /// Source filename (e.g. `GX020005.MP4`)
    pub filename: String,
    /// Clip length as `minutes:seconds`
    pub duration: String,
}

impl MediaEntry {
    pub fn new(id: impl Into<String>, filename: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            duration: duration.into(),
        }
    }
}

/// Position of a chunk inside its recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkName {
    pub chunk_index: u32,
    pub group_id: u32,
}

impl ChunkName {
    /// Parse a chunk filename
    ///
    /// # Examples
    ///
    /// ```
    /// use retimecore::media::ChunkName;
    ///
    /// let name = ChunkName::parse("GX020005.MP4").unwrap();
    /// assert_eq!(name.chunk_index, 2);
    /// assert_eq!(name.group_id, 5);
    /// ```
    pub fn parse(filename: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidFilename(filename.to_string());

        let caps = CHUNK_FILENAME_REGEX.captures(filename.trim()).ok_or_else(invalid)?;
        let chunk_index = caps[1].parse::<u32>().map_err(|_| invalid())?;
        let group_id = caps[2].parse::<u32>().map_err(|_| invalid())?;

        Ok(Self { chunk_index, group_id })
    }
}

/// Length of one clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ClipDuration {
    minutes: u32,
    seconds: u32,
}

impl ClipDuration {
    pub fn new(minutes: u32, seconds: u32) -> Result<Self, ParseError> {
        if seconds >= 60 {
            return Err(ParseError::InvalidDuration(format!("{}:{:02}", minutes, seconds)));
        }
        Ok(Self { minutes, seconds })
    }

    /// Parse `M:SS` / `MM:SS`, e.g. `"01:30"` or `"12:05"`
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidDuration(text.to_string());

        let caps = DURATION_REGEX.captures(text.trim()).ok_or_else(invalid)?;
        let minutes = caps[1].parse::<u32>().map_err(|_| invalid())?;
        let seconds = caps[2].parse::<u32>().map_err(|_| invalid())?;

        if seconds >= 60 {
            return Err(invalid());
        }
        Ok(Self { minutes, seconds })
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn total_seconds(&self) -> i64 {
        i64::from(self.minutes) * 60 + i64::from(self.seconds)
    }

    pub fn as_time_delta(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.minutes)) + TimeDelta::seconds(i64::from(self.seconds))
    }
}

impl fmt::Display for ClipDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// A validated chunk of a recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaChunk {
    pub id: String,
    pub filename: String,
    pub duration: ClipDuration,
    pub chunk_index: u32,
    pub group_id: u32,
}

impl TryFrom<MediaEntry> for MediaChunk {
    type Error = ParseError;

    fn try_from(entry: MediaEntry) -> Result<Self, Self::Error> {
        let name = ChunkName::parse(&entry.filename)?;
        let duration = ClipDuration::parse(&entry.duration)?;

        Ok(Self {
            id: entry.id,
            filename: entry.filename,
            duration,
            chunk_index: name.chunk_index,
            group_id: name.group_id,
        })
    }
}
