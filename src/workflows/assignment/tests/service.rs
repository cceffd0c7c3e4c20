use std::sync::Arc;

use super::common::*;
use crate::workflows::assignment::{
    AssignmentRecord, AvailabilitySource, JobContext, JobWindow, PreferenceDirectory,
    PreferencePolarity, PreferenceRecord, PreferenceScope, ScreeningPolicy, ScreeningService,
    SourceError, TimeOffCalendar, TimeOffRequest, TimeOffStatus, WarningType, WorkerId,
    WorkerPreference,
};

struct UnavailableSources;

impl AvailabilitySource for UnavailableSources {
    fn conflicting_assignments(
        &self,
        _worker: &WorkerId,
        _window: JobWindow,
        _exclude_job: Option<&str>,
    ) -> Result<Vec<AssignmentRecord>, SourceError> {
        Err(SourceError::Unavailable("scheduling API offline".to_string()))
    }
}

impl PreferenceDirectory for UnavailableSources {
    fn scoped_preferences(
        &self,
        _scope: PreferenceScope,
        _scope_id: &str,
    ) -> Result<Vec<PreferenceRecord>, SourceError> {
        Err(SourceError::Unavailable("preference API offline".to_string()))
    }

    fn worker_preferences(
        &self,
        _workers: &[WorkerId],
    ) -> Result<Vec<WorkerPreference>, SourceError> {
        Err(SourceError::Unavailable("preference API offline".to_string()))
    }
}

impl TimeOffCalendar for UnavailableSources {
    fn requests_for(&self, _worker: &WorkerId) -> Result<Vec<TimeOffRequest>, SourceError> {
        Err(SourceError::Unavailable("leave API offline".to_string()))
    }
}

#[test]
fn source_failures_degrade_to_a_clean_verdict() {
    let sources = Arc::new(UnavailableSources);
    let service = ScreeningService::new(
        sources.clone(),
        sources.clone(),
        sources,
        ScreeningPolicy::default(),
    );

    let outcome = service.screen(&candidate("w-1", "Ana Reyes"), &job(), &[]);

    assert!(outcome.verdict.issues.is_empty());
    assert!(outcome.verdict.can_proceed);
    assert_eq!(outcome.enriched.sort_priority, 0);
}

#[test]
fn directory_backed_overlap_blocks_the_candidate() {
    let (service, directory) = build_service();
    directory.record_assignment(assignment("w-1", "480", at(10, 6), at(10, 14)));

    let outcome = service.screen(&candidate("w-1", "Ana Reyes"), &job(), &[]);

    assert!(!outcome.verdict.can_proceed);
    assert!(outcome.enriched.has_blocking_schedule_conflict);
}

#[test]
fn editing_a_job_excludes_its_own_assignments() {
    let (service, directory) = build_service();
    directory.record_assignment(assignment("w-1", "480", at(10, 6), at(10, 14)));

    let editing = JobContext {
        job_id: Some("480".to_string()),
        ..job()
    };
    let outcome = service.screen(&candidate("w-1", "Ana Reyes"), &editing, &[]);

    assert!(outcome.verdict.can_proceed);
    assert!(!outcome.enriched.has_schedule_conflict);
}

#[test]
fn scoped_preferences_resolve_through_the_job_identifiers() {
    let (service, directory) = build_service();
    directory.record_scoped_preference(
        PreferenceScope::Client,
        "client-12",
        scoped("w-1", PreferencePolarity::NotPreferred, true, Some("Escort required")),
    );
    // A record under a different client never surfaces.
    directory.record_scoped_preference(
        PreferenceScope::Client,
        "client-99",
        scoped("w-1", PreferencePolarity::Preferred, false, None),
    );

    let outcome = service.screen(&candidate("w-1", "Ana Reyes"), &job(), &[]);

    assert_eq!(
        outcome.verdict.messages(),
        vec!["Client (Mandatory): Escort required"]
    );
    assert_eq!(
        outcome.verdict.warning_type,
        WarningType::MandatoryNotPreferred
    );
}

#[test]
fn rank_orders_candidates_by_priority_and_keeps_ties_stable() {
    let (service, directory) = build_service();
    directory.record_time_off(time_off(
        "w-1",
        "annual leave",
        TimeOffStatus::Approved,
        9,
        11,
    ));
    directory.record_assignment(assignment("w-2", "480", at(10, 6), at(10, 14)));
    directory.record_scoped_preference(
        PreferenceScope::Site,
        "site-7",
        scoped("w-4", PreferencePolarity::Preferred, false, None),
    );

    let candidates = vec![
        candidate("w-1", "Time Off"),
        candidate("w-2", "Overlap"),
        candidate("w-3", "Clean A"),
        candidate("w-4", "Preferred"),
        candidate("w-5", "Clean B"),
    ];
    let ranked = service.rank(&candidates, &job(), &[]);

    let order: Vec<&str> = ranked
        .iter()
        .map(|candidate| candidate.full_name.as_str())
        .collect();
    assert_eq!(
        order,
        vec!["Preferred", "Clean A", "Clean B", "Overlap", "Time Off"]
    );
    assert!(ranked[0].sort_priority < 0);
    assert!(ranked[3].has_blocking_schedule_conflict);
    assert!(ranked[4].has_time_off_conflict);
}
