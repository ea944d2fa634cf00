use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A member's standing as the points endpoint returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LeaderboardEntry {
    pub name: String,
    pub rid: String,
    pub points: i64,
}

/// Order entries by points, highest first.
///
/// The sort is stable: members on equal points keep the order the backend
/// returned them in.
pub fn ranked(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| b.points.cmp(&a.points));
    entries
}

/// Entries strictly below the notification threshold, in the given order.
/// Drives the low-points reminder flow; a member exactly on the threshold is
/// not flagged.
pub fn below_threshold(entries: &[LeaderboardEntry], threshold: i64) -> Vec<&LeaderboardEntry> {
    entries
        .iter()
        .filter(|entry| entry.points < threshold)
        .collect()
}
