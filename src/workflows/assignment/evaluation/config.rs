use chrono::Duration;
use serde::{Deserialize, Serialize};

const DEFAULT_REST_GAP_HOURS: i64 = 8;
const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 30;

/// Policy dials for the screening rules: the minimum rest gap between
/// assignments and the certification expiry warning window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningPolicy {
    minimum_rest_gap_hours: i64,
    certification_expiry_window_days: i64,
}

impl ScreeningPolicy {
    pub fn new(minimum_rest_gap_hours: i64, certification_expiry_window_days: i64) -> Self {
        let rest_gap = if minimum_rest_gap_hours > 0 {
            minimum_rest_gap_hours
        } else {
            DEFAULT_REST_GAP_HOURS
        };
        let expiry_window = if certification_expiry_window_days >= 0 {
            certification_expiry_window_days
        } else {
            DEFAULT_EXPIRY_WINDOW_DAYS
        };

        Self {
            minimum_rest_gap_hours: rest_gap,
            certification_expiry_window_days: expiry_window,
        }
    }

    /// Build from optional overrides, falling back to the defaults.
    pub fn from_overrides(
        minimum_rest_gap_hours: Option<i64>,
        certification_expiry_window_days: Option<i64>,
    ) -> Self {
        Self::new(
            minimum_rest_gap_hours.unwrap_or(DEFAULT_REST_GAP_HOURS),
            certification_expiry_window_days.unwrap_or(DEFAULT_EXPIRY_WINDOW_DAYS),
        )
    }

    pub fn minimum_rest_gap_hours(&self) -> i64 {
        self.minimum_rest_gap_hours
    }

    pub fn minimum_rest_gap(&self) -> Duration {
        Duration::hours(self.minimum_rest_gap_hours)
    }

    pub fn certification_expiry_window_days(&self) -> i64 {
        self.certification_expiry_window_days
    }
}

impl Default for ScreeningPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_REST_GAP_HOURS, DEFAULT_EXPIRY_WINDOW_DAYS)
    }
}
