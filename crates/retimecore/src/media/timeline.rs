//! Capture time accumulation across the chunks of a recording.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::core::error::{AppError, AppResult};
use crate::media::chunk::{ClipDuration, MediaChunk};
use crate::media::group::RecordingGroup;

/// The corrected capture time for one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedUpdate {
    pub media_id: String,
    pub filename: String,
    pub captured_at: DateTime<Utc>,
}

impl PlannedUpdate {
    /// `captured_at` as the media API expects it: `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn captured_at_wire(&self) -> String {
        format_captured_at(&self.captured_at)
    }
}

/// Second precision, UTC, trailing `Z`.
pub fn format_captured_at(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Running capture time of the next chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    current: DateTime<Utc>,
}

impl Timeline {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> DateTime<Utc> {
        self.current
    }

    /// Moves past a clip of the given length.
    ///
    /// Fails with `Validation` when the result leaves chrono's representable range;
    /// `current` is left untouched in that case.
    pub fn advance(&mut self, by: ClipDuration) -> AppResult<()> {
        self.current = self
            .current
            .checked_add_signed(by.as_time_delta())
            .ok_or_else(|| AppError::Validation(format!("capture time {} + {} is out of range", self.current, by)))?;
        Ok(())
    }

    /// Assigns every chunk its capture time.
    ///
    /// The first chunk keeps `start`; each later chunk starts where the previous one ended.
    pub fn plan(group: &RecordingGroup, start: DateTime<Utc>) -> AppResult<Vec<PlannedUpdate>> {
        let mut timeline = Self::starting_at(start);
        let mut previous: Option<&MediaChunk> = None;

        group
            .chunks()
            .iter()
            .map(|chunk| {
                if let Some(prev) = previous {
                    timeline.advance(prev.duration)?;
                }
                previous = Some(chunk);

                Ok(PlannedUpdate {
                    media_id: chunk.id.clone(),
                    filename: chunk.filename.clone(),
                    captured_at: timeline.current(),
                })
            })
            .collect()
    }
}
