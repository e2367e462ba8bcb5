use crate::core::error::{AppError, AppResult};
use crate::media::chunk::{MediaChunk, MediaEntry};

/// The chunks of one recording, in chronological (chunk index) order.
///
/// Never empty, and every chunk shares the same group id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingGroup {
    group_id: u32,
    chunks: Vec<MediaChunk>,
}

impl RecordingGroup {
    /// Parses and validates raw entries into a single recording.
    ///
    /// Fails with `NoSelection` for an empty input, `Parse` for the first malformed
    /// filename or duration, and `MultipleRecordings` when group ids differ.
    pub fn from_entries(entries: Vec<MediaEntry>) -> AppResult<Self> {
        let chunks = entries
            .into_iter()
            .map(MediaChunk::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_chunks(chunks)
    }

    pub fn from_chunks(mut chunks: Vec<MediaChunk>) -> AppResult<Self> {
        let group_id = chunks.first().map(|c| c.group_id).ok_or(AppError::NoSelection)?;

        if let Some(other) = chunks.iter().find(|c| c.group_id != group_id) {
            return Err(AppError::MultipleRecordings {
                expected: group_id,
                found: other.group_id,
            });
        }

        // stable: equal indices keep their input order
        chunks.sort_by_key(|c| c.chunk_index);

        Ok(Self { group_id, chunks })
    }

    pub fn group_id(&self) -> u32 {
        self.group_id
    }

    pub fn chunks(&self) -> &[MediaChunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn into_chunks(self) -> Vec<MediaChunk> {
        self.chunks
    }
}
