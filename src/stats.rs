//! Dashboard aggregates derived from the video collection.
//!
//! Pure functions over a record slice; the caller supplies "today" so the
//! calendar-sensitive counts are reproducible. Day boundaries are local
//! midnight-to-midnight: a record's upload instant is converted to the local
//! calendar date before comparison.

use std::collections::{BTreeMap, HashSet};

use chrono::{Days, Local, NaiveDate};
use serde::Serialize;

use crate::content_model::{VideoCategory, VideoRecord, VideoSource};

/// Per-source record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    pub local: usize,
    pub youtube: usize,
}

/// Headline numbers for the dashboard stat tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStats {
    pub total: usize,
    pub count_by_type: TypeCounts,
    pub distinct_category_count: usize,
    pub created_today_count: usize,
}

fn local_day(record: &VideoRecord) -> NaiveDate {
    record.uploaded_at.with_timezone(&Local).date_naive()
}

/// Totals, per-source counts, distinct categories and created-today count.
pub fn video_stats(videos: &[VideoRecord], today: NaiveDate) -> VideoStats {
    let mut count_by_type = TypeCounts::default();
    for video in videos {
        match video.source {
            VideoSource::Local => count_by_type.local += 1,
            VideoSource::Youtube => count_by_type.youtube += 1,
        }
    }
    let categories: HashSet<VideoCategory> = videos.iter().map(|v| v.category).collect();
    VideoStats {
        total: videos.len(),
        count_by_type,
        distinct_category_count: categories.len(),
        created_today_count: videos.iter().filter(|v| local_day(v) == today).count(),
    }
}

/// One bucket of the upload histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// Short weekday name ("Mon", "Tue", ...).
    pub label: String,
    pub count: usize,
}

/// Upload counts for the last `days` calendar days ending at `today`,
/// oldest day first. Always yields exactly `days` entries.
pub fn daily_histogram(videos: &[VideoRecord], days: u32, today: NaiveDate) -> Vec<DailyCount> {
    let mut buckets = Vec::with_capacity(days as usize);
    for back in (0..days).rev() {
        let day = today - Days::new(u64::from(back));
        let count = videos.iter().filter(|v| local_day(v) == day).count();
        buckets.push(DailyCount {
            label: day.format("%a").to_string(),
            count,
        });
    }
    buckets
}

/// Record tally per category. Categories with no records are omitted.
pub fn category_breakdown(videos: &[VideoRecord]) -> BTreeMap<VideoCategory, usize> {
    let mut tally = BTreeMap::new();
    for video in videos {
        *tally.entry(video.category).or_insert(0) += 1;
    }
    tally
}

/// The `limit` most recently uploaded records, newest first.
pub fn recent_videos(videos: &[VideoRecord], limit: usize) -> Vec<VideoRecord> {
    let mut sorted = videos.to_vec();
    sorted.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
    sorted.truncate(limit);
    sorted
}
