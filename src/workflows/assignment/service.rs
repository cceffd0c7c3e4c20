use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::conflicts::JobWindow;
use super::domain::{
    AssignedWorker, Candidate, JobContext, PreferenceRecord, PreferenceScope, WorkerId,
};
use super::enrichment::{EnrichedCandidate, ScreeningInputs};
use super::evaluation::{ScreeningEngine, ScreeningPolicy, Verdict};
use super::sources::{AvailabilitySource, PreferenceDirectory, SourceError, TimeOffCalendar};

/// Service composing the upstream staffing sources with the two-pass engine.
pub struct ScreeningService<A, P, T> {
    availability: Arc<A>,
    preferences: Arc<P>,
    time_off: Arc<T>,
    engine: Arc<ScreeningEngine>,
}

/// Result of screening a single candidate for one job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningOutcome {
    pub enriched: EnrichedCandidate,
    pub verdict: Verdict,
}

/// List-view entry produced by `rank`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCandidate {
    pub worker_id: WorkerId,
    pub full_name: String,
    pub sort_priority: i32,
    pub has_schedule_conflict: bool,
    pub has_blocking_schedule_conflict: bool,
    pub has_time_off_conflict: bool,
    pub has_mandatory_not_preferred: bool,
    pub has_not_preferred: bool,
    pub preferred_count: u32,
}

impl From<&EnrichedCandidate> for RankedCandidate {
    fn from(enriched: &EnrichedCandidate) -> Self {
        Self {
            worker_id: enriched.candidate.worker_id.clone(),
            full_name: enriched.candidate.full_name.clone(),
            sort_priority: enriched.sort_priority,
            has_schedule_conflict: enriched.has_schedule_conflict,
            has_blocking_schedule_conflict: enriched.has_blocking_schedule_conflict,
            has_time_off_conflict: enriched.has_time_off_conflict,
            has_mandatory_not_preferred: enriched.has_mandatory_not_preferred,
            has_not_preferred: enriched.has_not_preferred,
            preferred_count: enriched.preferred_count,
        }
    }
}

impl<A, P, T> ScreeningService<A, P, T>
where
    A: AvailabilitySource + 'static,
    P: PreferenceDirectory + 'static,
    T: TimeOffCalendar + 'static,
{
    pub fn new(
        availability: Arc<A>,
        preferences: Arc<P>,
        time_off: Arc<T>,
        policy: ScreeningPolicy,
    ) -> Self {
        Self {
            availability,
            preferences,
            time_off,
            engine: Arc::new(ScreeningEngine::new(policy)),
        }
    }

    pub fn engine(&self) -> &ScreeningEngine {
        &self.engine
    }

    /// Screen one candidate: gather inputs, enrich, evaluate.
    pub fn screen(
        &self,
        candidate: &Candidate,
        job: &JobContext,
        assigned: &[AssignedWorker],
    ) -> ScreeningOutcome {
        let inputs = self.gather_inputs(candidate, job, assigned);
        let enriched = self.engine.enrich(candidate, job, &inputs);
        let verdict = self.engine.evaluate(&enriched, job);
        ScreeningOutcome { enriched, verdict }
    }

    /// Enrich every candidate and order the list by sort priority. The sort
    /// is stable, so candidates with equal priority keep their input order.
    pub fn rank(
        &self,
        candidates: &[Candidate],
        job: &JobContext,
        assigned: &[AssignedWorker],
    ) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = candidates
            .iter()
            .map(|candidate| {
                let inputs = self.gather_inputs(candidate, job, assigned);
                RankedCandidate::from(&self.engine.enrich(candidate, job, &inputs))
            })
            .collect();
        ranked.sort_by_key(|candidate| candidate.sort_priority);
        ranked
    }

    /// Upstream failures degrade to empty lists so screening stays fail-open;
    /// the engine never sees an error sentinel. A job without a time window
    /// skips the availability and time-off fetches entirely.
    fn gather_inputs(
        &self,
        candidate: &Candidate,
        job: &JobContext,
        assigned: &[AssignedWorker],
    ) -> ScreeningInputs {
        let mut inputs = ScreeningInputs {
            assigned_workers: assigned.to_vec(),
            ..ScreeningInputs::default()
        };

        if let Some(window) = JobWindow::from_context(job) {
            inputs.assignments = self
                .availability
                .conflicting_assignments(&candidate.worker_id, window, job.job_id.as_deref())
                .unwrap_or_else(|err| degraded("availability", err));
            inputs.time_off = self
                .time_off
                .requests_for(&candidate.worker_id)
                .unwrap_or_else(|err| degraded("time_off", err));
        }

        inputs.company_preferences = self.scoped(PreferenceScope::Company, job.company_id.as_deref());
        inputs.site_preferences = self.scoped(PreferenceScope::Site, job.site_id.as_deref());
        inputs.client_preferences = self.scoped(PreferenceScope::Client, job.client_id.as_deref());

        let mut workers: Vec<WorkerId> = assigned
            .iter()
            .map(|peer| peer.worker_id.clone())
            .collect();
        workers.push(candidate.worker_id.clone());
        inputs.worker_preferences = self
            .preferences
            .worker_preferences(&workers)
            .unwrap_or_else(|err| degraded("worker_preferences", err));

        inputs
    }

    fn scoped(&self, scope: PreferenceScope, scope_id: Option<&str>) -> Vec<PreferenceRecord> {
        let Some(scope_id) = scope_id else {
            return Vec::new();
        };
        self.preferences
            .scoped_preferences(scope, scope_id)
            .unwrap_or_else(|err| degraded(scope.label(), err))
    }
}

fn degraded<R>(source: &str, err: SourceError) -> Vec<R> {
    warn!(%err, source, "staffing source degraded to empty results");
    Vec::new()
}
