//! Mock media update service
//!
//! Records every call with the (tokio) instant it started, optionally simulates
//! response latency and fails configured media ids.

#![allow(dead_code)]

use async_trait::async_trait;
use retimecore::{AppError, AppResult, MediaUpdateService};
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// One call as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub media_id: String,
    pub captured_at: String,
    pub started: Instant,
}

#[derive(Debug, Default)]
pub struct MockUpdateService {
    /// Simulated time to answer each call
    latency: Duration,
    /// Media ids that answer with an error
    failing: HashSet<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockUpdateService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn failing_for(mut self, media_id: &str) -> Self {
        self.failing.insert(media_id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaUpdateService for MockUpdateService {
    async fn update_captured_at(&self, media_id: &str, captured_at: &str) -> AppResult<()> {
        self.calls.lock().unwrap().push(RecordedCall {
            media_id: media_id.to_string(),
            captured_at: captured_at.to_string(),
            started: Instant::now(),
        });

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.failing.contains(media_id) {
            return Err(AppError::UpdateDispatch {
                media_id: media_id.to_string(),
                reason: "simulated HTTP 401".to_string(),
            });
        }
        Ok(())
    }
}
