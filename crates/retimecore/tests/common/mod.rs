//! Common test utilities
//!
//! Shared fixtures for the integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use retimecore::{DelayRange, MediaEntry, Pacer};

/// 2024-01-01T00:00:00Z
pub fn new_year() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Three chunks of recording 5, deliberately out of order
pub fn three_chunks() -> Vec<MediaEntry> {
    vec![
        MediaEntry::new("media-3", "GX030005.MP4", "11:48"),
        MediaEntry::new("media-1", "GX010005.MP4", "01:30"),
        MediaEntry::new("media-2", "GX020005.MP4", "00:45"),
    ]
}

/// `count` consecutive chunks of recording 42, each `02:00` long
pub fn chunks_of_recording(count: u32) -> Vec<MediaEntry> {
    (1..=count)
        .map(|i| MediaEntry::new(format!("media-{}", i), format!("GX{:02}0042.MP4", i), "02:00"))
        .collect()
}

/// Seeded pacer over the production range
pub fn seeded_pacer(seed: u64) -> Pacer {
    Pacer::with_rng(DelayRange::default(), StdRng::seed_from_u64(seed))
}

/// Seeded pacer with a short range for tests against a real socket
pub fn quick_pacer(seed: u64) -> Pacer {
    Pacer::with_rng(DelayRange::new(25, 40).unwrap(), StdRng::seed_from_u64(seed))
}
