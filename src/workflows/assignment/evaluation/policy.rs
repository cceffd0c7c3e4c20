use serde::{Deserialize, Serialize};

use super::super::conflicts::ScheduleConflict;
use super::super::domain::WorkerId;

/// Structured category tag carried alongside each formatted issue string, so
/// dialog routing never depends on the wording of the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Certification,
    TimeOff,
    ScheduleOverlap,
    MandatoryNotPreferred,
    PeerConflict,
    NotPreferred,
}

/// One finding surfaced to the dispatcher, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityIssue {
    pub kind: IssueKind,
    pub message: String,
    pub blocking: bool,
}

/// Which dialog the accumulated findings route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    TimeOffConflict,
    MandatoryNotPreferred,
    ScheduleConflict,
    WorkerConflict,
    CertificationIssues,
    NotPreferred,
}

/// Rest-gap acknowledgment payload with the raw conflicting records attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDialogue {
    pub conflicts: Vec<ScheduleConflict>,
}

/// Final screening verdict consumed by the assignment dialogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub worker_id: WorkerId,
    pub issues: Vec<EligibilityIssue>,
    pub has_mandatory_issues: bool,
    pub can_proceed: bool,
    pub warning_type: WarningType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_dialogue: Option<ScheduleDialogue>,
}

impl Verdict {
    pub fn messages(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.message.as_str()).collect()
    }
}

/// Fixed-priority classification over issue tags. Kept in the same order the
/// dispatcher dialogs expect: time off wins, then any blocking finding, then
/// schedule, peer, and certification findings.
pub(crate) fn classify_warning(issues: &[EligibilityIssue], has_mandatory: bool) -> WarningType {
    if issues.iter().any(|issue| issue.kind == IssueKind::TimeOff) {
        return WarningType::TimeOffConflict;
    }
    if has_mandatory {
        return WarningType::MandatoryNotPreferred;
    }
    if issues
        .iter()
        .any(|issue| issue.kind == IssueKind::ScheduleOverlap)
    {
        return WarningType::ScheduleConflict;
    }
    if issues
        .iter()
        .any(|issue| issue.kind == IssueKind::PeerConflict)
    {
        return WarningType::WorkerConflict;
    }
    if issues
        .iter()
        .any(|issue| issue.kind == IssueKind::Certification)
    {
        return WarningType::CertificationIssues;
    }
    WarningType::NotPreferred
}
