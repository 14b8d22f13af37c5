//! Score events and the aggregates derived from them.
//!
//! Events are append-only facts; totals are recomputed on read rather
//! than stored, so there is no running counter to keep consistent.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use std::collections::BTreeMap;

/// A user collecting a mission's points at a point in time.
///
/// Stored in the `score_events` collection, one document per event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct ScoreEvent {
    /// Opaque event ID (also used as document ID)
    pub id: String,
    /// Owner of the event
    pub user_id: String,
    /// Mission the points came from
    pub mission_id: String,
    /// Mission title at collection time
    pub mission_title: String,
    pub points: u32,
    pub created_at: DateTime<Utc>,
}

impl ScoreEvent {
    /// UTC calendar day the event falls on.
    pub fn day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

/// Points collected on one calendar day.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct DailyScore {
    pub date: NaiveDate,
    pub points: u64,
}

/// Sum of points across all events.
pub fn total_points(events: &[ScoreEvent]) -> u64 {
    events.iter().map(|e| u64::from(e.points)).sum()
}

/// Sum of points for events on `date`.
///
/// Returns `None` when nothing was recorded that day, which callers
/// report as "not found" rather than zero.
pub fn points_on(events: &[ScoreEvent], date: NaiveDate) -> Option<u64> {
    let mut matched = false;
    let mut sum = 0u64;

    for event in events.iter().filter(|e| e.day() == date) {
        matched = true;
        sum += u64::from(event.points);
    }

    matched.then_some(sum)
}

/// Per-day totals, oldest day first.
pub fn points_by_day(events: &[ScoreEvent]) -> Vec<DailyScore> {
    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for event in events {
        *by_day.entry(event.day()).or_insert(0) += u64::from(event.points);
    }

    by_day
        .into_iter()
        .map(|(date, points)| DailyScore { date, points })
        .collect()
}

/// Parse a `YYYY-MM-DD` path segment.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
