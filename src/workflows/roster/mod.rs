//! Roster import from the staffing system's worker CSV export.

mod parser;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use crate::workflows::assignment::{Candidate, CertificationStatus, Position, WorkerId};
use parser::RosterRecord;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { worker_id: String, detail: String },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::Row { worker_id, detail } => {
                write!(f, "invalid roster row for worker '{}': {}", worker_id, detail)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::Row { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path(
        path: impl AsRef<Path>,
        today: NaiveDate,
        expiry_window_days: i64,
    ) -> Result<Vec<Candidate>, RosterImportError> {
        let file = File::open(path)?;
        Self::from_reader(file, today, expiry_window_days)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        today: NaiveDate,
        expiry_window_days: i64,
    ) -> Result<Vec<Candidate>, RosterImportError> {
        let records = parser::parse_records(reader)?;
        records
            .into_iter()
            .map(|record| candidate_from_record(record, today, expiry_window_days))
            .collect()
    }
}

fn candidate_from_record(
    record: RosterRecord,
    today: NaiveDate,
    expiry_window_days: i64,
) -> Result<Candidate, RosterImportError> {
    let position = parse_position(&record.position).ok_or_else(|| RosterImportError::Row {
        worker_id: record.worker_id.clone(),
        detail: format!("unknown position '{}'", record.position),
    })?;

    Ok(Candidate {
        worker_id: WorkerId(record.worker_id),
        full_name: record.name,
        position,
        tcp_certification: certification_from_expiry(record.tcp_expiry, today, expiry_window_days),
        driver_license: certification_from_expiry(record.license_expiry, today, expiry_window_days),
    })
}

fn parse_position(raw: &str) -> Option<Position> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "tcp" | "traffic controller" | "traffic_controller" => Some(Position::TrafficController),
        "driver" => Some(Position::Driver),
        "supervisor" | "foreman" => Some(Position::Supervisor),
        _ => None,
    }
}

/// Map an expiry date to the credentials snapshot the evaluator consumes.
/// A blank cell means the worker holds no certification at all.
fn certification_from_expiry(
    expiry: Option<NaiveDate>,
    today: NaiveDate,
    expiry_window_days: i64,
) -> CertificationStatus {
    match expiry {
        None => CertificationStatus::missing(),
        Some(expiry) => {
            let days_remaining = (expiry - today).num_days();
            CertificationStatus {
                has_certification: true,
                is_valid: days_remaining >= 0,
                is_expiring_soon: (0..=expiry_window_days).contains(&days_remaining),
                days_remaining: Some(days_remaining),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
Worker ID,Name,Position,TCP Expiry,License Expiry
W-001,Ana Reyes,TCP,2026-09-01,
W-002,Sam Okafor,Driver,2026-04-15,2026-03-20
W-003,Lee Tran,Supervisor,,
";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date")
    }

    #[test]
    fn imports_candidates_with_certification_states() {
        let candidates =
            RosterImporter::from_reader(Cursor::new(SAMPLE), today(), 30).expect("import");
        assert_eq!(candidates.len(), 3);

        let ana = &candidates[0];
        assert_eq!(ana.worker_id, WorkerId("W-001".to_string()));
        assert_eq!(ana.position, Position::TrafficController);
        assert!(ana.tcp_certification.is_valid);
        assert!(!ana.tcp_certification.is_expiring_soon);
        assert!(!ana.driver_license.has_certification);

        let sam = &candidates[1];
        assert_eq!(sam.position, Position::Driver);
        assert!(sam.driver_license.is_expiring_soon);
        assert_eq!(sam.driver_license.days_remaining, Some(10));
    }

    #[test]
    fn expired_dates_are_invalid_but_held() {
        let csv = "Worker ID,Name,Position,TCP Expiry,License Expiry\n\
W-004,Kai Burke,TCP,2026-03-01,\n";
        let candidates = RosterImporter::from_reader(Cursor::new(csv), today(), 30).expect("import");
        let cert = candidates[0].tcp_certification;
        assert!(cert.has_certification);
        assert!(!cert.is_valid);
        assert_eq!(cert.days_remaining, Some(-9));
    }

    #[test]
    fn unknown_position_is_a_row_error() {
        let csv = "Worker ID,Name,Position,TCP Expiry,License Expiry\n\
W-005,Pat Quinn,Dispatcher,,\n";
        match RosterImporter::from_reader(Cursor::new(csv), today(), 30) {
            Err(RosterImportError::Row { worker_id, detail }) => {
                assert_eq!(worker_id, "W-005");
                assert!(detail.contains("Dispatcher"));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }
}
