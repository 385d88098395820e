use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded symptom entry.
///
/// Records are owned by the caller's history store and arrive ordered by
/// timestamp ascending. Severity is the 1-10 intensity rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomRecord {
    pub timestamp: DateTime<Utc>,
    pub severity: u8,
    pub symptom_type: String,
}

impl SymptomRecord {
    pub fn new(timestamp: DateTime<Utc>, severity: u8, symptom_type: impl Into<String>) -> Self {
        Self {
            timestamp,
            severity,
            symptom_type: symptom_type.into(),
        }
    }
}

/// Directional classification of recent vs older average severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

/// Descriptive summary of a symptom history.
///
/// Derived value only: recomputed fresh on every call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Symptoms per week over the span of the history (0 for a single record).
    pub frequency_per_week: f64,
    /// Mean severity, rounded to 2 decimal places. 0 for empty history.
    pub avg_severity: f64,
    pub trend: Trend,
    pub total_count: usize,
}

impl TrendSummary {
    /// Sentinel returned for an empty history.
    pub fn empty() -> Self {
        Self {
            frequency_per_week: 0.0,
            avg_severity: 0.0,
            trend: Trend::InsufficientData,
            total_count: 0,
        }
    }
}

/// Outcome of a completed training run, reported through the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    pub samples: usize,
    /// Coefficient of determination on the training set. Informational only.
    pub r2: f64,
}
