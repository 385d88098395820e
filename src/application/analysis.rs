//! Descriptive pattern analysis over a symptom history.
//!
//! Pure functions over an ordered record sequence. Nothing here touches the
//! regression model; the summary is recomputed fresh on every call.

use crate::domain::types::{SymptomRecord, Trend, TrendSummary};
use statrs::statistics::{Data, Distribution};

/// Window size for the trend comparison.
const TREND_WINDOW: usize = 7;

/// Computes frequency, average severity and a directional trend for an
/// ordered (timestamp ascending) symptom history.
///
/// Trend compares the mean severity of the last 7 records against the 7
/// before them. With fewer than 14 records, `older` is whatever precedes the
/// recent window, and an empty `older` defaults to the recent mean (yielding
/// `Stable`). The asymmetric window degrades gracefully on sparse history
/// instead of requiring a fixed 14-record minimum.
pub fn analyze(records: &[SymptomRecord]) -> TrendSummary {
    if records.is_empty() {
        return TrendSummary::empty();
    }

    TrendSummary {
        frequency_per_week: frequency_per_week(records),
        avg_severity: round2(mean_severity(records)),
        trend: classify_trend(records),
        total_count: records.len(),
    }
}

/// Symptoms per week over the recorded span.
///
/// A single record has no span, so its frequency is 0 rather than undefined.
/// Same-day histories count the span as one day.
fn frequency_per_week(records: &[SymptomRecord]) -> f64 {
    if records.len() < 2 {
        return 0.0;
    }

    let first = records[0].timestamp;
    let last = records[records.len() - 1].timestamp;
    let days = (last - first).num_days().max(1) as f64;

    round2(records.len() as f64 / days * 7.0)
}

fn mean_severity(records: &[SymptomRecord]) -> f64 {
    let severities: Vec<f64> = records.iter().map(|r| r.severity as f64).collect();
    Data::new(severities).mean().unwrap_or(0.0)
}

fn classify_trend(records: &[SymptomRecord]) -> Trend {
    if records.len() < TREND_WINDOW {
        return Trend::InsufficientData;
    }

    let split = records.len() - TREND_WINDOW;
    let recent = &records[split..];
    let older = if records.len() >= 2 * TREND_WINDOW {
        &records[records.len() - 2 * TREND_WINDOW..split]
    } else {
        &records[..split]
    };

    let recent_avg = mean_severity(recent);
    let older_avg = if older.is_empty() {
        recent_avg
    } else {
        mean_severity(older)
    };

    if recent_avg > older_avg {
        Trend::Increasing
    } else if recent_avg < older_avg {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
