use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::conflicts::{self, JobWindow, ScheduleConflict, ScheduleConflictKind};
use super::domain::{
    AssignedWorker, AssignmentRecord, Candidate, JobContext, PreferencePolarity, PreferenceRecord,
    PreferenceScope, TimeOffRequest, WorkerId, WorkerPreference,
};
use super::evaluation::ScreeningPolicy;

/// Per-evaluation snapshot of everything the upstream endpoints returned.
/// Every list may be empty; empty is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningInputs {
    #[serde(default)]
    pub company_preferences: Vec<PreferenceRecord>,
    #[serde(default)]
    pub site_preferences: Vec<PreferenceRecord>,
    #[serde(default)]
    pub client_preferences: Vec<PreferenceRecord>,
    #[serde(default)]
    pub worker_preferences: Vec<WorkerPreference>,
    #[serde(default)]
    pub assignments: Vec<AssignmentRecord>,
    #[serde(default)]
    pub time_off: Vec<TimeOffRequest>,
    #[serde(default)]
    pub assigned_workers: Vec<AssignedWorker>,
}

/// The scope-level preference match for the candidate, reduced to the fields
/// the verdict needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedPreference {
    pub polarity: PreferencePolarity,
    pub is_mandatory: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeerConflictDirection {
    /// An already-assigned worker marked this candidate not preferred.
    MarkedByPeer,
    /// This candidate marked an already-assigned worker not preferred.
    MarkedPeer,
}

/// A worker-to-worker not-preferred record touching the candidate and an
/// already-assigned peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerConflict {
    pub peer_name: String,
    pub is_mandatory: bool,
    pub reason: Option<String>,
    pub direction: PeerConflictDirection,
}

/// Candidate with derived conflict and preference facts attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedCandidate {
    pub candidate: Candidate,
    pub company_preference: Option<ScopedPreference>,
    pub site_preference: Option<ScopedPreference>,
    pub client_preference: Option<ScopedPreference>,
    pub schedule_conflicts: Vec<ScheduleConflict>,
    pub time_off_conflicts: Vec<TimeOffRequest>,
    pub peer_conflicts: Vec<PeerConflict>,
    pub has_schedule_conflict: bool,
    pub has_blocking_schedule_conflict: bool,
    pub has_time_off_conflict: bool,
    pub has_mandatory_not_preferred: bool,
    pub has_not_preferred: bool,
    pub has_preferred: bool,
    pub preferred_count: u32,
    pub sort_priority: i32,
}

impl EnrichedCandidate {
    pub fn direct_overlaps(&self) -> impl Iterator<Item = &ScheduleConflict> {
        self.schedule_conflicts
            .iter()
            .filter(|conflict| conflict.kind == ScheduleConflictKind::DirectOverlap)
    }

    pub(crate) fn scoped_preferences(
        &self,
    ) -> [(PreferenceScope, Option<&ScopedPreference>); 3] {
        [
            (PreferenceScope::Company, self.company_preference.as_ref()),
            (PreferenceScope::Site, self.site_preference.as_ref()),
            (PreferenceScope::Client, self.client_preference.as_ref()),
        ]
    }
}

/// First screening pass: match preferences, partition conflicts, and compute
/// the list sort priority. Pure; re-running with the same snapshot yields the
/// same result.
pub(crate) fn enrich(
    candidate: &Candidate,
    job: &JobContext,
    inputs: &ScreeningInputs,
    policy: &ScreeningPolicy,
) -> EnrichedCandidate {
    let worker = &candidate.worker_id;

    let company_preference = scoped_match(&inputs.company_preferences, worker);
    let site_preference = scoped_match(&inputs.site_preferences, worker);
    let client_preference = scoped_match(&inputs.client_preferences, worker);

    let schedule_conflicts = match JobWindow::from_context(job) {
        Some(window) => {
            let own: Vec<AssignmentRecord> = inputs
                .assignments
                .iter()
                .filter(|assignment| &assignment.worker_id == worker)
                .cloned()
                .collect();
            conflicts::classify_assignments(&own, window, policy.minimum_rest_gap())
        }
        None => Vec::new(),
    };

    let time_off_conflicts: Vec<TimeOffRequest> = match (job.starts_at, job.ends_at) {
        (Some(starts_at), Some(ends_at)) => {
            let job_start = starts_at.date_naive();
            let job_end = ends_at.date_naive();
            inputs
                .time_off
                .iter()
                .filter(|request| {
                    &request.worker_id == worker
                        && request.is_active()
                        && conflicts::dates_overlap(
                            request.starts_on,
                            request.ends_on,
                            job_start,
                            job_end,
                        )
                })
                .cloned()
                .collect()
        }
        _ => Vec::new(),
    };

    let peer_conflicts = collect_peer_conflicts(
        worker,
        &inputs.worker_preferences,
        &inputs.assigned_workers,
    );

    let has_schedule_conflict = !schedule_conflicts.is_empty();
    let has_blocking_schedule_conflict = schedule_conflicts
        .iter()
        .any(|conflict| conflict.kind == ScheduleConflictKind::DirectOverlap);
    let has_time_off_conflict = !time_off_conflicts.is_empty();

    let scoped = [
        company_preference.as_ref(),
        site_preference.as_ref(),
        client_preference.as_ref(),
    ];
    let has_mandatory_not_preferred = scoped.iter().flatten().any(|preference| {
        preference.polarity == PreferencePolarity::NotPreferred && preference.is_mandatory
    });
    let scoped_regular_not_preferred = scoped.iter().flatten().any(|preference| {
        preference.polarity == PreferencePolarity::NotPreferred && !preference.is_mandatory
    });
    let has_not_preferred = scoped_regular_not_preferred
        || peer_conflicts.iter().any(|conflict| !conflict.is_mandatory);
    let preferred_count = scoped
        .iter()
        .flatten()
        .filter(|preference| preference.polarity == PreferencePolarity::Preferred)
        .count() as u32;
    let has_preferred = preferred_count > 0;

    let sort_priority = if has_time_off_conflict {
        3000
    } else if has_schedule_conflict {
        2000
    } else if has_mandatory_not_preferred {
        1000
    } else if preferred_count > 0 {
        -(preferred_count as i32)
    } else if has_not_preferred {
        500
    } else {
        0
    };

    EnrichedCandidate {
        candidate: candidate.clone(),
        company_preference,
        site_preference,
        client_preference,
        schedule_conflicts,
        time_off_conflicts,
        peer_conflicts,
        has_schedule_conflict,
        has_blocking_schedule_conflict,
        has_time_off_conflict,
        has_mandatory_not_preferred,
        has_not_preferred,
        has_preferred,
        preferred_count,
        sort_priority,
    }
}

fn scoped_match(records: &[PreferenceRecord], worker: &WorkerId) -> Option<ScopedPreference> {
    records
        .iter()
        .find(|record| &record.worker_id == worker)
        .map(|record| ScopedPreference {
            polarity: record.polarity,
            is_mandatory: record.is_mandatory,
            reason: record.reason.clone(),
        })
}

/// Union of both directions of not-preferred records against assigned peers.
/// Self-references are excluded.
fn collect_peer_conflicts(
    worker: &WorkerId,
    records: &[WorkerPreference],
    assigned: &[AssignedWorker],
) -> Vec<PeerConflict> {
    let assigned_ids: HashSet<&WorkerId> = assigned.iter().map(|peer| &peer.worker_id).collect();
    let mut found = Vec::new();

    for record in records {
        if record.polarity != PreferencePolarity::NotPreferred
            || record.author_id == record.subject_id
        {
            continue;
        }

        if &record.subject_id == worker && assigned_ids.contains(&record.author_id) {
            found.push(PeerConflict {
                peer_name: record.author_name.clone(),
                is_mandatory: record.is_mandatory,
                reason: record.reason.clone(),
                direction: PeerConflictDirection::MarkedByPeer,
            });
        } else if &record.author_id == worker && assigned_ids.contains(&record.subject_id) {
            found.push(PeerConflict {
                peer_name: record.subject_name.clone(),
                is_mandatory: record.is_mandatory,
                reason: record.reason.clone(),
                direction: PeerConflictDirection::MarkedPeer,
            });
        }
    }

    found
}
