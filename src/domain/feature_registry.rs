use crate::domain::types::SymptomRecord;
use chrono::Datelike;

/// Ordered list of feature names.
/// This order MUST match the order used when the model was trained.
/// Any change here is a breaking change for persisted model artifacts.
pub const FEATURE_NAMES: &[&str] = &["severity", "day_of_week", "has_mood", "symptom_type_code"];

/// Number of fields the regression model expects.
pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

/// Converts a symptom record into a feature vector in registry order.
///
/// `symptom_type_code` is a stable small-integer encoding of the type name;
/// unknown types map to the last bucket rather than failing.
pub fn record_to_vector(record: &SymptomRecord, has_mood: bool) -> Vec<f64> {
    vec![
        record.severity as f64,
        record.timestamp.weekday().num_days_from_monday() as f64,
        if has_mood { 1.0 } else { 0.0 },
        encode_symptom_type(&record.symptom_type) as f64,
    ]
}

const KNOWN_TYPES: &[&str] = &[
    "hot_flash",
    "night_sweats",
    "mood_swings",
    "fatigue",
    "headache",
    "insomnia",
    "anxiety",
    "joint_pain",
    "brain_fog",
];

pub fn encode_symptom_type(symptom_type: &str) -> usize {
    KNOWN_TYPES
        .iter()
        .position(|t| *t == symptom_type)
        .unwrap_or(KNOWN_TYPES.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    #[test]
    fn test_registry_width() {
        assert_eq!(FEATURE_COUNT, 4);
    }

    #[test]
    fn test_record_to_vector_order() {
        // 2026-01-05 is a Monday
        let ts = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
        let record = SymptomRecord::new(ts, 7, "fatigue");

        let vec = record_to_vector(&record, true);
        assert_eq!(vec.len(), FEATURE_COUNT);
        assert_eq!(vec[0], 7.0);
        assert_eq!(vec[1], 0.0); // Monday
        assert_eq!(vec[2], 1.0);
        assert_eq!(vec[3], 3.0); // fatigue
    }

    #[test]
    fn test_unknown_type_maps_to_last_bucket() {
        assert_eq!(encode_symptom_type("something_else"), KNOWN_TYPES.len());
    }

}
