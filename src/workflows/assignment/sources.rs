use std::collections::HashMap;
use std::sync::Mutex;

use super::conflicts::JobWindow;
use super::domain::{
    AssignmentRecord, PreferenceRecord, PreferenceScope, TimeOffRequest, WorkerId, WorkerPreference,
};

/// Error raised by an upstream staffing endpoint.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("staffing source unavailable: {0}")]
    Unavailable(String),
}

/// Availability-check seam: which of a worker's other assignments clash with
/// the requested window, with an optional job excluded (editing an existing
/// job must not conflict with itself).
pub trait AvailabilitySource: Send + Sync {
    fn conflicting_assignments(
        &self,
        worker: &WorkerId,
        window: JobWindow,
        exclude_job: Option<&str>,
    ) -> Result<Vec<AssignmentRecord>, SourceError>;
}

/// Preference-list seam: one list per scope plus worker-to-worker records.
pub trait PreferenceDirectory: Send + Sync {
    fn scoped_preferences(
        &self,
        scope: PreferenceScope,
        scope_id: &str,
    ) -> Result<Vec<PreferenceRecord>, SourceError>;

    /// Records authored by or naming any of the given workers.
    fn worker_preferences(
        &self,
        workers: &[WorkerId],
    ) -> Result<Vec<WorkerPreference>, SourceError>;
}

/// Time-off endpoint seam.
pub trait TimeOffCalendar: Send + Sync {
    fn requests_for(&self, worker: &WorkerId) -> Result<Vec<TimeOffRequest>, SourceError>;
}

/// In-memory staffing data backing the server binary, demos, and tests.
///
/// Returns the full per-worker assignment snapshot regardless of window;
/// classification downstream trims anything out of range.
#[derive(Default)]
pub struct StaffingDirectory {
    inner: Mutex<DirectoryState>,
}

#[derive(Default)]
struct DirectoryState {
    assignments: Vec<AssignmentRecord>,
    scoped: HashMap<(PreferenceScope, String), Vec<PreferenceRecord>>,
    worker_preferences: Vec<WorkerPreference>,
    time_off: Vec<TimeOffRequest>,
}

impl StaffingDirectory {
    pub fn record_assignment(&self, assignment: AssignmentRecord) {
        self.lock().assignments.push(assignment);
    }

    pub fn record_scoped_preference(
        &self,
        scope: PreferenceScope,
        scope_id: &str,
        record: PreferenceRecord,
    ) {
        self.lock()
            .scoped
            .entry((scope, scope_id.to_string()))
            .or_default()
            .push(record);
    }

    pub fn record_worker_preference(&self, record: WorkerPreference) {
        self.lock().worker_preferences.push(record);
    }

    pub fn record_time_off(&self, request: TimeOffRequest) {
        self.lock().time_off.push(request);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DirectoryState> {
        self.inner.lock().expect("directory mutex poisoned")
    }
}

impl AvailabilitySource for StaffingDirectory {
    fn conflicting_assignments(
        &self,
        worker: &WorkerId,
        _window: JobWindow,
        exclude_job: Option<&str>,
    ) -> Result<Vec<AssignmentRecord>, SourceError> {
        let state = self.lock();
        Ok(state
            .assignments
            .iter()
            .filter(|assignment| &assignment.worker_id == worker)
            .filter(|assignment| exclude_job.map_or(true, |job| assignment.job_number != job))
            .cloned()
            .collect())
    }
}

impl PreferenceDirectory for StaffingDirectory {
    fn scoped_preferences(
        &self,
        scope: PreferenceScope,
        scope_id: &str,
    ) -> Result<Vec<PreferenceRecord>, SourceError> {
        let state = self.lock();
        Ok(state
            .scoped
            .get(&(scope, scope_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn worker_preferences(
        &self,
        workers: &[WorkerId],
    ) -> Result<Vec<WorkerPreference>, SourceError> {
        let state = self.lock();
        Ok(state
            .worker_preferences
            .iter()
            .filter(|record| {
                workers.contains(&record.author_id) || workers.contains(&record.subject_id)
            })
            .cloned()
            .collect())
    }
}

impl TimeOffCalendar for StaffingDirectory {
    fn requests_for(&self, worker: &WorkerId) -> Result<Vec<TimeOffRequest>, SourceError> {
        let state = self.lock();
        Ok(state
            .time_off
            .iter()
            .filter(|request| &request.worker_id == worker)
            .cloned()
            .collect())
    }
}
