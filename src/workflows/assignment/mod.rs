//! Candidate screening for job assignments.
//!
//! The core is a pure two-pass evaluator: `enrich` attaches matched
//! preferences, schedule conflicts, time-off clashes, and a sort priority to
//! a candidate; `evaluate` turns the derived facts into a verdict the
//! assignment dialogs can act on. The service layer feeds both passes from
//! the staffing source seams and never lets an upstream failure reach them.

pub mod conflicts;
pub mod domain;
mod enrichment;
mod evaluation;
pub mod router;
pub mod service;
pub mod sources;

#[cfg(test)]
mod tests;

pub use conflicts::{JobWindow, ScheduleConflict, ScheduleConflictKind};
pub use domain::{
    AssignedWorker, AssignmentRecord, Candidate, CertificationStatus, JobContext, Position,
    PreferencePolarity, PreferenceRecord, PreferenceScope, TimeOffRequest, TimeOffStatus,
    WorkerId, WorkerPreference,
};
pub use enrichment::{
    EnrichedCandidate, PeerConflict, PeerConflictDirection, ScopedPreference, ScreeningInputs,
};
pub use evaluation::{
    EligibilityIssue, IssueKind, ScheduleDialogue, ScreeningEngine, ScreeningPolicy, Verdict,
    WarningType,
};
pub use router::assignment_router;
pub use service::{RankedCandidate, ScreeningOutcome, ScreeningService};
pub use sources::{
    AvailabilitySource, PreferenceDirectory, SourceError, StaffingDirectory, TimeOffCalendar,
};
