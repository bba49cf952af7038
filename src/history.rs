//! Trend tracking - bounded in-memory log of past analyses
//!
//! History lives for the session only; nothing is written to disk.

use crate::{truncate_chars, AnalysisResult, Category};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// Entries retained for trend computation
pub const DEFAULT_CAPACITY: usize = 10;
/// Entries exposed by the detail view
pub const DEFAULT_RECENT: usize = 5;
/// Characters of input kept in a preview
pub const PREVIEW_CHARS: usize = 100;

/// A retained record of a past analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub timestamp: DateTime<Local>,
    pub score: u8,
    pub category: Category,
    pub text_preview: String,
}

impl HistoryEntry {
    /// Build an entry stamped with the current local time
    pub fn from_result(result: &AnalysisResult, text: &str) -> Self {
        Self {
            timestamp: Local::now(),
            score: result.score,
            category: result.category,
            text_preview: preview(text),
        }
    }
}

/// First 100 characters of `text`, with "..." appended when cut
pub fn preview(text: &str) -> String {
    match truncate_chars(text, PREVIEW_CHARS) {
        (head, true) => format!("{}...", head),
        (whole, false) => whole.to_string(),
    }
}

/// Bounded append-only store, oldest evicted first
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    recent: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_RECENT)
    }
}

impl HistoryStore {
    /// `capacity` is clamped to at least 1; `recent` to at most `capacity`
    pub fn new(capacity: usize, recent: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
            recent: recent.min(capacity),
        }
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Scores oldest to newest
    pub fn trend_series(&self) -> Vec<u8> {
        self.entries.iter().map(|e| e.score).collect()
    }

    /// Most recent entries for the detail view, newest first
    pub fn recent(&self) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(self.recent).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Average of retained scores
    pub fn average_score(&self) -> Option<u8> {
        if self.entries.is_empty() {
            return None;
        }
        let sum: u32 = self.entries.iter().map(|e| e.score as u32).sum();
        Some((sum / self.entries.len() as u32) as u8)
    }
}

/// Handle to a [`HistoryStore`] that serializes all mutations
#[derive(Debug, Default)]
pub struct SharedHistory {
    inner: Mutex<HistoryStore>,
}

impl SharedHistory {
    pub fn new(store: HistoryStore) -> Self {
        Self {
            inner: Mutex::new(store),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HistoryStore> {
        // A panic while holding the lock cannot leave the deque over capacity,
        // so a poisoned store is still usable
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record a completed analysis
    pub fn record(&self, result: &AnalysisResult, text: &str) {
        self.append(HistoryEntry::from_result(result, text));
    }

    pub fn append(&self, entry: HistoryEntry) {
        self.lock().append(entry);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn trend_series(&self) -> Vec<u8> {
        self.lock().trend_series()
    }

    /// Owned copy of the detail view, newest first
    pub fn recent(&self) -> Vec<HistoryEntry> {
        self.lock().recent().into_iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Trend, recent view and average read under a single lock
    pub fn snapshot(&self) -> HistorySnapshot {
        let store = self.lock();
        HistorySnapshot {
            trend: store.trend_series(),
            recent: store.recent().into_iter().cloned().collect(),
            average: store.average_score(),
        }
    }
}

/// Point-in-time view of the history handed to reporters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    /// Scores oldest to newest
    pub trend: Vec<u8>,
    /// Newest first
    pub recent: Vec<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<u8>,
}

/// Format delta against the previous analysis: "[was 82, down 4]", "[was 82, up 2]" or ""
pub fn format_delta(previous: Option<u8>, current: u8) -> String {
    let Some(prev) = previous else {
        return String::new();
    };
    if prev == current {
        return format!(" [unchanged at {}]", current);
    }
    let diff = current as i16 - prev as i16;
    if diff > 0 {
        format!(" [was {}, up {}]", prev, diff)
    } else {
        format!(" [was {}, down {}]", prev, -diff)
    }
}
