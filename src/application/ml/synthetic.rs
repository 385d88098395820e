//! Seeded synthetic training data for the severity regressor.
//!
//! Used when no historical feature CSV is available. The target models
//! next-day severity: dominated by current severity, nudged by mood, plus
//! unit-normal noise, clipped to the valid severity range.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Generates `n_samples` feature rows (registry order) and target severities.
pub fn generate(n_samples: usize, seed: u64) -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).expect("unit normal is a valid distribution");

    let mut x = Vec::with_capacity(n_samples);
    let mut y = Vec::with_capacity(n_samples);

    for _ in 0..n_samples {
        let severity = rng.random_range(1..=10) as f64;
        let day_of_week = rng.random_range(0..7) as f64;
        let has_mood = rng.random_range(0..2) as f64;
        let symptom_type_code = rng.random_range(0..10) as f64;

        let target =
            (severity * 0.6 + has_mood * 0.5 + noise.sample(&mut rng)).clamp(1.0, 10.0);

        x.push(vec![severity, day_of_week, has_mood, symptom_type_code]);
        y.push(target);
    }

    (x, y)
}
