use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use crew_ai::config::AppConfig;
use crew_ai::error::AppError;
use crew_ai::telemetry;
use crew_ai::workflows::assignment::{
    assignment_router, AssignmentRecord, JobContext, Position, PreferencePolarity,
    PreferenceRecord, PreferenceScope, ScreeningOutcome, ScreeningService, StaffingDirectory,
    TimeOffRequest, TimeOffStatus, WorkerId,
};
use crew_ai::workflows::roster::RosterImporter;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Crew Assignment Screener",
    about = "Screen field crew candidates for job assignments from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Screen a roster of candidates for a job window and print the report
    Screen(ScreenArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Seed the in-memory staffing directory with demo records
    #[arg(long)]
    demo: bool,
}

#[derive(Args, Debug)]
struct ScreenArgs {
    /// Roster CSV export (Worker ID, Name, Position, TCP Expiry, License Expiry)
    #[arg(long)]
    roster: PathBuf,
    /// Job start (RFC 3339 or "YYYY-MM-DD HH:MM", UTC)
    #[arg(long, value_parser = parse_datetime)]
    job_start: DateTime<Utc>,
    /// Job end (RFC 3339 or "YYYY-MM-DD HH:MM", UTC)
    #[arg(long, value_parser = parse_datetime)]
    job_end: DateTime<Utc>,
    /// Position being staffed
    #[arg(long, value_parser = parse_position)]
    position: Position,
    /// Job number to exclude from availability checks when editing
    #[arg(long)]
    job_number: Option<String>,
    /// Certification evaluation date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Screen(args) => run_screen(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|err| format!("failed to parse '{raw}' as a UTC timestamp ({err})"))
}

fn parse_position(raw: &str) -> Result<Position, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "tcp" | "traffic controller" | "traffic_controller" => Ok(Position::TrafficController),
        "driver" => Ok(Position::Driver),
        "supervisor" => Ok(Position::Supervisor),
        other => Err(format!(
            "unknown position '{other}' (expected tcp, driver, or supervisor)"
        )),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let directory = Arc::new(StaffingDirectory::default());
    if args.demo {
        seed_demo_directory(&directory);
        info!("staffing directory seeded with demo records");
    }
    let service = Arc::new(ScreeningService::new(
        directory.clone(),
        directory.clone(),
        directory,
        config.screening.clone(),
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(assignment_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "crew assignment screener ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let ScreenArgs {
        roster,
        job_start,
        job_end,
        position,
        job_number,
        today,
    } = args;

    let config = AppConfig::load()?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let candidates = RosterImporter::from_path(
        roster,
        today,
        config.screening.certification_expiry_window_days(),
    )?;

    let directory = Arc::new(StaffingDirectory::default());
    let service = ScreeningService::new(
        directory.clone(),
        directory.clone(),
        directory,
        config.screening,
    );

    let job = JobContext {
        job_id: job_number,
        position,
        starts_at: Some(job_start),
        ends_at: Some(job_end),
        company_id: None,
        site_id: None,
        client_id: None,
    };

    let mut outcomes: Vec<ScreeningOutcome> = candidates
        .iter()
        .map(|candidate| service.screen(candidate, &job, &[]))
        .collect();
    outcomes.sort_by_key(|outcome| outcome.enriched.sort_priority);

    render_screening_report(&job, today, &outcomes);
    Ok(())
}

fn render_screening_report(job: &JobContext, today: NaiveDate, outcomes: &[ScreeningOutcome]) {
    println!("Assignment screening report");
    if let (Some(starts_at), Some(ends_at)) = (job.starts_at, job.ends_at) {
        println!(
            "Job window: {} -> {} (position {}, evaluated {})",
            starts_at.format("%Y-%m-%d %H:%M"),
            ends_at.format("%Y-%m-%d %H:%M"),
            job.position.label(),
            today
        );
    }

    if outcomes.is_empty() {
        println!("\nNo candidates in roster");
        return;
    }

    println!("\nCandidates (best first)");
    for outcome in outcomes {
        let candidate = &outcome.enriched.candidate;
        let verdict = &outcome.verdict;
        let standing = if !verdict.can_proceed {
            "blocked"
        } else if verdict.schedule_dialogue.is_some() || !verdict.issues.is_empty() {
            "warnings"
        } else {
            "clear"
        };
        println!(
            "- {} ({}) | {} | priority {} | {}",
            candidate.full_name,
            candidate.worker_id.0,
            candidate.position.label(),
            outcome.enriched.sort_priority,
            standing
        );
        for issue in &verdict.issues {
            for line in issue.message.lines() {
                println!("    {}", line);
            }
        }
        if verdict.schedule_dialogue.is_some() {
            println!("    Rest-gap conflict: needs dispatcher acknowledgment");
        }
    }
}

fn seed_demo_directory(directory: &StaffingDirectory) {
    let day = |d: u32, h: u32| Utc.with_ymd_and_hms(2026, 3, d, h, 0, 0).single();

    if let (Some(starts_at), Some(ends_at)) = (day(10, 6), day(10, 14)) {
        directory.record_assignment(AssignmentRecord {
            worker_id: WorkerId("W-002".to_string()),
            job_number: "480".to_string(),
            site_name: "Hillcrest Rd".to_string(),
            client_name: "Metro Council".to_string(),
            starts_at,
            ends_at,
        });
    }
    directory.record_scoped_preference(
        PreferenceScope::Company,
        "company-100",
        PreferenceRecord {
            worker_id: WorkerId("W-003".to_string()),
            polarity: PreferencePolarity::NotPreferred,
            is_mandatory: true,
            reason: Some("Safety incident under review".to_string()),
        },
    );
    if let (Some(starts_on), Some(ends_on)) = (
        NaiveDate::from_ymd_opt(2026, 3, 9),
        NaiveDate::from_ymd_opt(2026, 3, 12),
    ) {
        directory.record_time_off(TimeOffRequest {
            worker_id: WorkerId("W-004".to_string()),
            kind: "annual leave".to_string(),
            starts_on,
            ends_on,
            status: TimeOffStatus::Approved,
        });
    }
}
