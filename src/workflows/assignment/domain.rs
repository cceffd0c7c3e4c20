use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for workers in the staffing system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerId(pub String);

/// Positions the dispatcher can staff on a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    TrafficController,
    Driver,
    Supervisor,
}

impl Position {
    pub const fn label(self) -> &'static str {
        match self {
            Position::TrafficController => "Traffic Controller",
            Position::Driver => "Driver",
            Position::Supervisor => "Supervisor",
        }
    }

    /// TCP certification applies to every position; a license only to drivers.
    pub const fn requires_driver_license(self) -> bool {
        matches!(self, Position::Driver)
    }
}

/// Certification snapshot embedded on the candidate by the credentials system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationStatus {
    pub has_certification: bool,
    pub is_valid: bool,
    pub is_expiring_soon: bool,
    pub days_remaining: Option<i64>,
}

impl CertificationStatus {
    pub const fn missing() -> Self {
        Self {
            has_certification: false,
            is_valid: false,
            is_expiring_soon: false,
            days_remaining: None,
        }
    }
}

/// A worker under consideration for a job position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub worker_id: WorkerId,
    pub full_name: String,
    pub position: Position,
    pub tcp_certification: CertificationStatus,
    pub driver_license: CertificationStatus,
}

/// Immutable per-evaluation inputs describing the job being staffed.
///
/// Drafts may lack a time window; schedule and time-off checks are then
/// skipped rather than failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobContext {
    #[serde(default)]
    pub job_id: Option<String>,
    pub position: Position,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
}

/// Scopes that can mark a worker preferred or not preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceScope {
    Company,
    Site,
    Client,
}

impl PreferenceScope {
    pub const fn label(self) -> &'static str {
        match self {
            PreferenceScope::Company => "Company",
            PreferenceScope::Site => "Site",
            PreferenceScope::Client => "Client",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferencePolarity {
    Preferred,
    NotPreferred,
}

/// A scoped preference record naming a worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub worker_id: WorkerId,
    pub polarity: PreferencePolarity,
    pub is_mandatory: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// A directed worker-to-worker preference record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerPreference {
    pub author_id: WorkerId,
    pub author_name: String,
    pub subject_id: WorkerId,
    pub subject_name: String,
    pub polarity: PreferencePolarity,
    pub is_mandatory: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOffStatus {
    Pending,
    Approved,
    Rejected,
}

impl TimeOffStatus {
    pub const fn label(self) -> &'static str {
        match self {
            TimeOffStatus::Pending => "pending",
            TimeOffStatus::Approved => "approved",
            TimeOffStatus::Rejected => "rejected",
        }
    }
}

/// A leave request covering a calendar date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOffRequest {
    pub worker_id: WorkerId,
    pub kind: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub status: TimeOffStatus,
}

impl TimeOffRequest {
    /// Rejected requests never conflict; pending and approved ones do.
    pub fn is_active(&self) -> bool {
        !matches!(self.status, TimeOffStatus::Rejected)
    }
}

/// An existing assignment of a worker to another job, as returned by the
/// availability check. Carries enough detail to format a conflict message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub worker_id: WorkerId,
    pub job_number: String,
    pub site_name: String,
    pub client_name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// A worker already assigned to another position on the same job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedWorker {
    pub worker_id: WorkerId,
    pub full_name: String,
}
