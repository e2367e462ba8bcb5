//! In-memory media update service for pacing and failure tests

pub mod mock_update_service;

#[allow(unused_imports)]
pub use mock_update_service::{MockUpdateService, RecordedCall};
