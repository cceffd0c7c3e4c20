use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::domain::{AssignedWorker, Candidate, JobContext};
use super::evaluation::Verdict;
use super::service::{RankedCandidate, ScreeningService};
use super::sources::{AvailabilitySource, PreferenceDirectory, TimeOffCalendar};

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    pub job: JobContext,
    pub candidate: Candidate,
    #[serde(default)]
    pub assigned_workers: Vec<AssignedWorker>,
}

#[derive(Debug, Serialize)]
struct ScreenResponse {
    verdict: Verdict,
    sort_priority: i32,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub job: JobContext,
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub assigned_workers: Vec<AssignedWorker>,
}

#[derive(Debug, Serialize)]
struct RankResponse {
    candidates: Vec<RankedCandidate>,
}

/// Router builder exposing the screening endpoints.
pub fn assignment_router<A, P, T>(service: Arc<ScreeningService<A, P, T>>) -> Router
where
    A: AvailabilitySource + 'static,
    P: PreferenceDirectory + 'static,
    T: TimeOffCalendar + 'static,
{
    Router::new()
        .route("/api/v1/assignments/screen", post(screen_handler::<A, P, T>))
        .route("/api/v1/assignments/rank", post(rank_handler::<A, P, T>))
        .with_state(service)
}

pub(crate) async fn screen_handler<A, P, T>(
    State(service): State<Arc<ScreeningService<A, P, T>>>,
    Json(request): Json<ScreenRequest>,
) -> impl IntoResponse
where
    A: AvailabilitySource + 'static,
    P: PreferenceDirectory + 'static,
    T: TimeOffCalendar + 'static,
{
    let outcome = service.screen(&request.candidate, &request.job, &request.assigned_workers);
    let response = ScreenResponse {
        sort_priority: outcome.enriched.sort_priority,
        verdict: outcome.verdict,
    };
    (StatusCode::OK, Json(response))
}

pub(crate) async fn rank_handler<A, P, T>(
    State(service): State<Arc<ScreeningService<A, P, T>>>,
    Json(request): Json<RankRequest>,
) -> impl IntoResponse
where
    A: AvailabilitySource + 'static,
    P: PreferenceDirectory + 'static,
    T: TimeOffCalendar + 'static,
{
    let candidates = service.rank(&request.candidates, &request.job, &request.assigned_workers);
    (StatusCode::OK, Json(RankResponse { candidates }))
}
