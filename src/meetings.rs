use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::{AppError, AppResult};

/// One meeting record with its minutes. All fields are free text as entered
/// in the form; the log only guards that none of them is blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Meeting {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub date: String,
    pub description: String,
}

/// The club's meeting-minutes log.
///
/// Value-like, matching [`crate::calendar::EventIndex`]. Entries are stored
/// in the order they were added; listing reverses that so the latest meeting
/// leads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingLog {
    entries: Vec<Meeting>,
}

impl MeetingLog {
    pub fn new() -> Self {
        MeetingLog::default()
    }

    /// Build a log from a backend snapshot, oldest entry first.
    pub fn from_entries(entries: Vec<Meeting>) -> Self {
        MeetingLog { entries }
    }

    /// Append a meeting. Every field is required; a blank one is rejected
    /// with the offending field named in the error context.
    pub fn add(mut self, meeting: Meeting) -> AppResult<Self> {
        let required = [
            ("title", &meeting.title),
            ("start_time", &meeting.start_time),
            ("end_time", &meeting.end_time),
            ("date", &meeting.date),
            ("description", &meeting.description),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::new(
                    "MEETING/MISSING_FIELD",
                    "Please fill out all fields",
                )
                .with_context("field", field));
            }
        }

        self.entries.push(meeting);
        Ok(self)
    }

    /// Meetings latest-first for display.
    pub fn newest_first(&self) -> impl Iterator<Item = &Meeting> {
        self.entries.iter().rev()
    }

    /// Drop every entry. Backs the "delete all meetings" flow after the
    /// remote clear succeeds.
    pub fn clear(self) -> Self {
        debug!(
            target: "clubledger",
            event = "meeting_log_cleared",
            dropped = self.entries.len()
        );
        MeetingLog::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
