use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

/// A club member as the roster endpoint returns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Member {
    pub name: String,
    pub rid: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// One member's state on the sheet: their status and the points awarded for
/// this event. Points only ever accrue while the member is marked present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceMark {
    pub status: AttendanceStatus,
    pub points: i64,
}

/// One line of the submission payload sent to the backend once the sheet is
/// finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AttendanceRow {
    pub event_title: String,
    pub name: String,
    pub rid: String,
    pub attendance: AttendanceStatus,
    pub points: i64,
}

/// The attendance sheet for a single club event.
///
/// Value-like, matching [`crate::calendar::EventIndex`]: mutations consume
/// the sheet and return the next one, and the hosting view keeps the latest
/// value. Keyed by the member's registration id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceSheet {
    event_title: String,
    marks: BTreeMap<String, AttendanceMark>,
}

impl AttendanceSheet {
    /// An empty sheet for the named event.
    pub fn new(event_title: impl Into<String>) -> Self {
        AttendanceSheet {
            event_title: event_title.into(),
            marks: BTreeMap::new(),
        }
    }

    pub fn event_title(&self) -> &str {
        &self.event_title
    }

    /// Set a member's status, creating their mark if this is the first touch.
    ///
    /// Marking a member absent zeroes their points; absent members cannot
    /// hold points.
    pub fn mark(mut self, rid: impl Into<String>, status: AttendanceStatus) -> Self {
        let entry = self.marks.entry(rid.into()).or_insert(AttendanceMark {
            status,
            points: 0,
        });
        entry.status = status;
        if status == AttendanceStatus::Absent {
            entry.points = 0;
        }
        self
    }

    /// Set one present member's points. A no-op for absent or unmarked
    /// members, mirroring the sheet's points-require-presence rule.
    pub fn set_points(mut self, rid: &str, points: i64) -> Self {
        if let Some(mark) = self.marks.get_mut(rid) {
            if mark.status == AttendanceStatus::Present {
                mark.points = points;
            }
        }
        self
    }

    /// Award the same points to every member currently marked present.
    pub fn apply_bulk_points(mut self, points: i64) -> Self {
        let mut applied = 0usize;
        for mark in self.marks.values_mut() {
            if mark.status == AttendanceStatus::Present {
                mark.points = points;
                applied += 1;
            }
        }
        debug!(
            target: "clubledger",
            event = "attendance_bulk_points",
            event_title = %self.event_title,
            points,
            applied
        );
        self
    }

    /// The mark recorded for `rid`, if any.
    pub fn mark_for(&self, rid: &str) -> Option<&AttendanceMark> {
        self.marks.get(rid)
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Flatten the sheet into submission rows, joining each mark with the
    /// roster for the display name. A mark whose rid is missing from the
    /// roster still produces a row, just with an empty name.
    pub fn rows(&self, roster: &[Member]) -> Vec<AttendanceRow> {
        self.marks
            .iter()
            .map(|(rid, mark)| AttendanceRow {
                event_title: self.event_title.clone(),
                name: roster
                    .iter()
                    .find(|member| member.rid == *rid)
                    .map(|member| member.name.clone())
                    .unwrap_or_default(),
                rid: rid.clone(),
                attendance: mark.status,
                points: mark.points,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Member> {
        vec![
            Member {
                name: "Asha".to_string(),
                rid: "R001".to_string(),
            },
            Member {
                name: "Ben".to_string(),
                rid: "R002".to_string(),
            },
        ]
    }

    #[test]
    fn marking_absent_zeroes_points() {
        let sheet = AttendanceSheet::new("Beach Cleanup")
            .mark("R001", AttendanceStatus::Present)
            .set_points("R001", 10)
            .mark("R001", AttendanceStatus::Absent);

        let mark = sheet.mark_for("R001").unwrap();
        assert_eq!(mark.status, AttendanceStatus::Absent);
        assert_eq!(mark.points, 0);
    }

    #[test]
    fn points_require_presence() {
        let sheet = AttendanceSheet::new("Beach Cleanup")
            .mark("R001", AttendanceStatus::Absent)
            .set_points("R001", 10)
            .set_points("R002", 10); // never marked at all

        assert_eq!(sheet.mark_for("R001").unwrap().points, 0);
        assert!(sheet.mark_for("R002").is_none());
    }

    #[test]
    fn bulk_points_touch_only_present_members() {
        let sheet = AttendanceSheet::new("Beach Cleanup")
            .mark("R001", AttendanceStatus::Present)
            .mark("R002", AttendanceStatus::Absent)
            .apply_bulk_points(5);

        assert_eq!(sheet.mark_for("R001").unwrap().points, 5);
        assert_eq!(sheet.mark_for("R002").unwrap().points, 0);
    }

    #[test]
    fn rows_join_roster_names() {
        let sheet = AttendanceSheet::new("Beach Cleanup")
            .mark("R001", AttendanceStatus::Present)
            .set_points("R001", 5)
            .mark("R999", AttendanceStatus::Present);

        let rows = sheet.rows(&roster());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Asha");
        assert_eq!(rows[0].points, 5);
        // Unknown rid still submits, with an empty name.
        assert_eq!(rows[1].rid, "R999");
        assert_eq!(rows[1].name, "");
    }

    #[test]
    fn rows_serialize_with_camel_case_event_title() {
        let sheet =
            AttendanceSheet::new("Beach Cleanup").mark("R001", AttendanceStatus::Present);
        let json = serde_json::to_string(&sheet.rows(&roster())).unwrap();
        assert!(json.contains("\"eventTitle\":\"Beach Cleanup\""));
        assert!(json.contains("\"attendance\":\"Present\""));
    }
}
