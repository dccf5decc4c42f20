//! Descriptive statistics over numeric series

use serde::{Deserialize, Serialize};

/// Tukey's fence multiplier
pub const FENCE_MULTIPLIER: f64 = 1.5;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); 0.0 for fewer than two values
pub fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Quantile of an ascending series by linear interpolation between the
/// closest ranks (position `(n - 1) * p`). Returns 0.0 for an empty series.
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(
        sorted.windows(2).all(|w| w[0] <= w[1]),
        "quantile expects ascending input"
    );
    if sorted.is_empty() {
        return 0.0;
    }
    let p = p.clamp(0.0, 1.0);
    let pos = (sorted.len() - 1) as f64 * p;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

pub fn median(sorted: &[f64]) -> f64 {
    quantile(sorted, 0.5)
}

/// Quartiles and Tukey fences of a series
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TukeyFences {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    /// `max(0, Q1 - 1.5 * IQR)`; counts are never negative
    pub lower: f64,
    pub upper: f64,
}

impl TukeyFences {
    pub fn from_sorted(sorted: &[f64]) -> Self {
        let q1 = quantile(sorted, 0.25);
        let q3 = quantile(sorted, 0.75);
        let iqr = q3 - q1;
        Self {
            q1,
            q3,
            iqr,
            lower: (q1 - FENCE_MULTIPLIER * iqr).max(0.0),
            upper: q3 + FENCE_MULTIPLIER * iqr,
        }
    }

    /// Strictly outside `[lower, upper]`
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mean_and_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(approx(mean(&values), 5.0));
        // Sample variance = 32 / 7
        assert!(approx(sample_std_dev(&values), (32.0f64 / 7.0).sqrt()));
    }

    #[test]
    fn test_degenerate_series() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(sample_std_dev(&[]), 0.0);
        assert_eq!(sample_std_dev(&[4.0]), 0.0);
        assert_eq!(quantile(&[], 0.5), 0.0);
        assert_eq!(quantile(&[7.0], 0.25), 7.0);
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!(approx(quantile(&sorted, 0.25), 1.75));
        assert!(approx(median(&sorted), 2.5));
        assert!(approx(quantile(&sorted, 0.75), 3.25));
        assert!(approx(quantile(&sorted, 0.0), 1.0));
        assert!(approx(quantile(&sorted, 1.0), 4.0));
    }

    #[test]
    fn test_fences_clamp_lower_at_zero() {
        let sorted = [1.0, 1.0, 1.0, 10.0, 10.0, 10.0];
        let fences = TukeyFences::from_sorted(&sorted);
        assert!(approx(fences.q1, 1.0));
        assert!(approx(fences.q3, 10.0));
        assert!(approx(fences.iqr, 9.0));
        assert_eq!(fences.lower, 0.0);
        assert!(approx(fences.upper, 23.5));
    }

    #[test]
    fn test_is_outlier_is_strict() {
        let fences = TukeyFences {
            q1: 2.0,
            q3: 4.0,
            iqr: 2.0,
            lower: 1.0,
            upper: 7.0,
        };
        assert!(!fences.is_outlier(1.0));
        assert!(!fences.is_outlier(7.0));
        assert!(fences.is_outlier(0.5));
        assert!(fences.is_outlier(7.5));
    }
}
