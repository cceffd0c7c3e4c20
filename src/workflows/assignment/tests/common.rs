use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::workflows::assignment::{
    AssignedWorker, AssignmentRecord, Candidate, CertificationStatus, JobContext,
    Position, PreferencePolarity, PreferenceRecord, ScreeningEngine, ScreeningInputs,
    ScreeningPolicy, ScreeningService, StaffingDirectory, TimeOffRequest, TimeOffStatus,
    WorkerId, WorkerPreference,
};

pub(super) fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).expect("valid date")
}

pub(super) fn valid_cert() -> CertificationStatus {
    CertificationStatus {
        has_certification: true,
        is_valid: true,
        is_expiring_soon: false,
        days_remaining: Some(200),
    }
}

pub(super) fn candidate(id: &str, name: &str) -> Candidate {
    Candidate {
        worker_id: WorkerId(id.to_string()),
        full_name: name.to_string(),
        position: Position::TrafficController,
        tcp_certification: valid_cert(),
        driver_license: valid_cert(),
    }
}

/// Job window on 2026-03-10 from 07:00 to 15:00 UTC.
pub(super) fn job() -> JobContext {
    JobContext {
        job_id: None,
        position: Position::TrafficController,
        starts_at: Some(at(10, 7)),
        ends_at: Some(at(10, 15)),
        company_id: Some("company-100".to_string()),
        site_id: Some("site-7".to_string()),
        client_id: Some("client-12".to_string()),
    }
}

pub(super) fn engine() -> ScreeningEngine {
    ScreeningEngine::new(ScreeningPolicy::default())
}

pub(super) fn assignment(
    worker: &str,
    job_number: &str,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> AssignmentRecord {
    AssignmentRecord {
        worker_id: WorkerId(worker.to_string()),
        job_number: job_number.to_string(),
        site_name: "Site X".to_string(),
        client_name: "Metro Council".to_string(),
        starts_at,
        ends_at,
    }
}

pub(super) fn time_off(
    worker: &str,
    kind: &str,
    status: TimeOffStatus,
    start_day: u32,
    end_day: u32,
) -> TimeOffRequest {
    TimeOffRequest {
        worker_id: WorkerId(worker.to_string()),
        kind: kind.to_string(),
        starts_on: date(start_day),
        ends_on: date(end_day),
        status,
    }
}

pub(super) fn scoped(
    worker: &str,
    polarity: PreferencePolarity,
    is_mandatory: bool,
    reason: Option<&str>,
) -> PreferenceRecord {
    PreferenceRecord {
        worker_id: WorkerId(worker.to_string()),
        polarity,
        is_mandatory,
        reason: reason.map(str::to_string),
    }
}

pub(super) fn worker_pref(
    author: (&str, &str),
    subject: (&str, &str),
    is_mandatory: bool,
    reason: Option<&str>,
) -> WorkerPreference {
    WorkerPreference {
        author_id: WorkerId(author.0.to_string()),
        author_name: author.1.to_string(),
        subject_id: WorkerId(subject.0.to_string()),
        subject_name: subject.1.to_string(),
        polarity: PreferencePolarity::NotPreferred,
        is_mandatory,
        reason: reason.map(str::to_string),
    }
}

pub(super) fn assigned(id: &str, name: &str) -> AssignedWorker {
    AssignedWorker {
        worker_id: WorkerId(id.to_string()),
        full_name: name.to_string(),
    }
}

pub(super) fn inputs() -> ScreeningInputs {
    ScreeningInputs::default()
}

pub(super) type DirectoryService =
    ScreeningService<StaffingDirectory, StaffingDirectory, StaffingDirectory>;

pub(super) fn build_service() -> (Arc<DirectoryService>, Arc<StaffingDirectory>) {
    let directory = Arc::new(StaffingDirectory::default());
    let service = Arc::new(ScreeningService::new(
        directory.clone(),
        directory.clone(),
        directory.clone(),
        ScreeningPolicy::default(),
    ));
    (service, directory)
}
