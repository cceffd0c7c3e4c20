mod config;
mod policy;
mod rules;

pub use config::ScreeningPolicy;
pub use policy::{EligibilityIssue, IssueKind, ScheduleDialogue, Verdict, WarningType};

use super::domain::{Candidate, JobContext};
use super::enrichment::{self, EnrichedCandidate, ScreeningInputs};
use policy::classify_warning;

/// Stateless engine applying the screening policy in two passes.
pub struct ScreeningEngine {
    policy: ScreeningPolicy,
}

impl ScreeningEngine {
    pub fn new(policy: ScreeningPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScreeningPolicy {
        &self.policy
    }

    /// First pass: attach matched preferences, conflicts, and sort priority.
    pub fn enrich(
        &self,
        candidate: &Candidate,
        job: &JobContext,
        inputs: &ScreeningInputs,
    ) -> EnrichedCandidate {
        enrichment::enrich(candidate, job, inputs, &self.policy)
    }

    /// Second pass: turn the derived facts into a verdict.
    ///
    /// A rest-gap-only conflict routes straight to the acknowledgment
    /// dialogue and collects no other issues; everything else accumulates
    /// findings in order and blocks when any of them is mandatory.
    pub fn evaluate(&self, candidate: &EnrichedCandidate, job: &JobContext) -> Verdict {
        if candidate.has_schedule_conflict && !candidate.has_blocking_schedule_conflict {
            return Verdict {
                worker_id: candidate.candidate.worker_id.clone(),
                issues: Vec::new(),
                has_mandatory_issues: false,
                can_proceed: true,
                warning_type: WarningType::ScheduleConflict,
                schedule_dialogue: Some(ScheduleDialogue {
                    conflicts: candidate.schedule_conflicts.clone(),
                }),
            };
        }

        let issues = rules::collect_issues(candidate, job, &self.policy);
        let has_mandatory_issues = issues.iter().any(|issue| issue.blocking);
        let warning_type = classify_warning(&issues, has_mandatory_issues);

        Verdict {
            worker_id: candidate.candidate.worker_id.clone(),
            issues,
            has_mandatory_issues,
            can_proceed: !has_mandatory_issues,
            warning_type,
            schedule_dialogue: None,
        }
    }
}
