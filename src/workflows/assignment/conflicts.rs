use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AssignmentRecord, JobContext};

/// Resolved job time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobWindow {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl JobWindow {
    /// Drafts without both bounds screen as conflict-free rather than failing.
    pub fn from_context(job: &JobContext) -> Option<Self> {
        match (job.starts_at, job.ends_at) {
            (Some(starts_at), Some(ends_at)) => Some(Self { starts_at, ends_at }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleConflictKind {
    DirectOverlap,
    GapViolation,
}

/// One of the candidate's other assignments that clashes with the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConflict {
    pub assignment: AssignmentRecord,
    pub kind: ScheduleConflictKind,
}

fn ranges_intersect(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// Partition a worker's other assignments against the requested window.
///
/// Intersecting ranges are direct overlaps; disjoint ranges whose nearest
/// edge sits strictly closer than `rest_gap` to the window violate the
/// minimum rest policy. Everything further away is dropped.
pub fn classify_assignments(
    assignments: &[AssignmentRecord],
    window: JobWindow,
    rest_gap: Duration,
) -> Vec<ScheduleConflict> {
    let mut conflicts = Vec::new();

    for assignment in assignments {
        if ranges_intersect(
            assignment.starts_at,
            assignment.ends_at,
            window.starts_at,
            window.ends_at,
        ) {
            conflicts.push(ScheduleConflict {
                assignment: assignment.clone(),
                kind: ScheduleConflictKind::DirectOverlap,
            });
            continue;
        }

        let gap = if assignment.ends_at < window.starts_at {
            window.starts_at - assignment.ends_at
        } else {
            assignment.starts_at - window.ends_at
        };
        if gap < rest_gap {
            conflicts.push(ScheduleConflict {
                assignment: assignment.clone(),
                kind: ScheduleConflictKind::GapViolation,
            });
        }
    }

    conflicts
}

/// Calendar-date interval overlap used for time-off checks. Timestamp ranges
/// are truncated to dates before this test.
pub fn dates_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}
