//! Sequential re-timestamping of one recording.
//!
//! Every chunk's update is dispatched on its own task and the loop moves on after a
//! randomized pause measured from dispatch, not from the response. A failed update is
//! logged and reported but never stops the remaining chunks. Validation happens up
//! front, so a bad selection dispatches nothing.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::api::MediaUpdateService;
use crate::core::error::AppResult;
use crate::core::pacing::Pacer;
use crate::media::{MediaEntry, PlannedUpdate, RecordingGroup, Timeline};

/// What happened to one chunk's update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum UpdateOutcome {
    Updated,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkReport {
    pub media_id: String,
    pub filename: String,
    pub captured_at: String,
    pub outcome: UpdateOutcome,
}

/// Summary of one run, chunks in chronological order.
#[derive(Debug, Clone, Serialize)]
pub struct RetimestampReport {
    pub group_id: u32,
    pub chunks: Vec<ChunkReport>,
    /// Pauses taken between dispatches (one fewer than dispatched chunks)
    #[serde(skip)]
    pub delays: Vec<Duration>,
}

impl RetimestampReport {
    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, UpdateOutcome::Updated))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, UpdateOutcome::Failed(_)))
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&UpdateOutcome) -> bool) -> usize {
        self.chunks.iter().filter(|c| pred(&c.outcome)).count()
    }
}

/// Re-timestamps the chunks of a single recording through a [`MediaUpdateService`].
pub struct Retimestamper {
    service: Arc<dyn MediaUpdateService>,
    pacer: Pacer,
}

impl Retimestamper {
    pub fn new(service: Arc<dyn MediaUpdateService>, pacer: Pacer) -> Self {
        Self { service, pacer }
    }

    /// Validates the selection and computes every chunk's capture time without sending anything.
    pub fn plan(start: DateTime<Utc>, entries: Vec<MediaEntry>) -> AppResult<(RecordingGroup, Vec<PlannedUpdate>)> {
        let group = RecordingGroup::from_entries(entries)?;
        let plan = Timeline::plan(&group, start)?;
        Ok((group, plan))
    }

    /// Runs the whole sequence and waits for every dispatched update to finish.
    ///
    /// Returns an error only for selection problems (empty, several recordings,
    /// malformed filename or duration); per-chunk failures are in the report.
    pub async fn run(&mut self, start: DateTime<Utc>, entries: Vec<MediaEntry>) -> AppResult<RetimestampReport> {
        let span = tracing::info_span!("retimestamp", chunks = entries.len());
        self.run_inner(start, entries).instrument(span).await
    }

    async fn run_inner(&mut self, start: DateTime<Utc>, entries: Vec<MediaEntry>) -> AppResult<RetimestampReport> {
        let (group, plan) = Self::plan(start, entries)?;

        log::info!(
            "Recording {}: {} chunk(s), first chunk captured at {}",
            group.group_id(),
            plan.len(),
            start.to_rfc3339()
        );

        let (outcomes, delays) = self.dispatch_all(&plan).await;
        let report = Self::report(&group, &plan, outcomes, delays);

        log::info!(
            "Recording {}: {} updated, {} failed",
            report.group_id,
            report.updated(),
            report.failed()
        );
        Ok(report)
    }

    async fn dispatch_all(&mut self, plan: &[PlannedUpdate]) -> (Vec<UpdateOutcome>, Vec<Duration>) {
        let mut in_flight = JoinSet::new();
        let mut delays = Vec::with_capacity(plan.len().saturating_sub(1));
        let last = plan.len().saturating_sub(1);

        for (index, update) in plan.iter().enumerate() {
            let service = Arc::clone(&self.service);
            let media_id = update.media_id.clone();
            let captured_at = update.captured_at_wire();

            in_flight.spawn(async move {
                let result = service.update_captured_at(&media_id, &captured_at).await;
                match &result {
                    Ok(()) => log::info!("successfully updated media {}", media_id),
                    Err(e) => log::error!("{}", e),
                }
                (index, result)
            });

            if index < last {
                let delay = self.pacer.next_delay();
                log::info!("waiting {}ms", delay.as_millis());
                delays.push(delay);
                tokio::time::sleep(delay).await;
            }
        }

        let mut outcomes = vec![UpdateOutcome::Failed("update task did not complete".to_string()); plan.len()];
        while let Some(joined) = in_flight.join_next().await {
            match joined {
                Ok((index, Ok(()))) => outcomes[index] = UpdateOutcome::Updated,
                Ok((index, Err(e))) => outcomes[index] = UpdateOutcome::Failed(e.to_string()),
                Err(e) => log::error!("update task aborted: {}", e),
            }
        }

        (outcomes, delays)
    }

    fn report(
        group: &RecordingGroup,
        plan: &[PlannedUpdate],
        outcomes: Vec<UpdateOutcome>,
        delays: Vec<Duration>,
    ) -> RetimestampReport {
        let chunks = plan
            .iter()
            .zip(outcomes)
            .map(|(update, outcome)| ChunkReport {
                media_id: update.media_id.clone(),
                filename: update.filename.clone(),
                captured_at: update.captured_at_wire(),
                outcome,
            })
            .collect();

        RetimestampReport {
            group_id: group.group_id(),
            chunks,
            delays,
        }
    }
}
