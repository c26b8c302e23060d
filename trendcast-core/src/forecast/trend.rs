//! Closed-form least-squares line through `(row index, close)` pairs.
//!
//! Uses the mean-centred normal equations:
//!   slope     = Σ(i − ī)(y − ȳ) / Σ(i − ī)²
//!   intercept = ȳ − slope · ī
//! Positions are distinct ranks, so the denominator is non-zero for n ≥ 2.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Fewest points that determine a line.
pub const MIN_FIT_POINTS: usize = 2;

/// Fitted trend `close ≈ slope * i + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
    /// Number of observations used; the last observed position is `n - 1`.
    pub n_observations: usize,
}

impl LinearTrend {
    /// Fit against `values[i]` at position `i`.
    pub fn fit(values: &[f64]) -> Result<Self, PipelineError> {
        let n = values.len();
        if n < MIN_FIT_POINTS {
            return Err(PipelineError::InsufficientData {
                required: MIN_FIT_POINTS,
                actual: n,
            });
        }

        let nf = n as f64;
        // Mean of 0..n-1.
        let mean_x = (nf - 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / nf;

        let mut sxy = 0.0;
        let mut sxx = 0.0;
        for (i, &y) in values.iter().enumerate() {
            let dx = i as f64 - mean_x;
            sxy += dx * (y - mean_y);
            sxx += dx * dx;
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        Ok(Self {
            slope,
            intercept,
            n_observations: n,
        })
    }

    /// Predicted value at an absolute row position.
    pub fn predict_at(&self, position: usize) -> f64 {
        self.slope * position as f64 + self.intercept
    }

    /// Position of the last observation used in the fit.
    pub fn last_position(&self) -> usize {
        self.n_observations - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn perfect_line_recovers_slope_and_intercept() {
        let trend = LinearTrend::fit(&[100.0, 102.0, 104.0, 106.0, 108.0]).unwrap();
        assert!((trend.slope - 2.0).abs() < EPS);
        assert!((trend.intercept - 100.0).abs() < EPS);
        assert_eq!(trend.last_position(), 4);
        assert!((trend.predict_at(5) - 110.0).abs() < EPS);
    }

    #[test]
    fn two_points_define_the_line() {
        let trend = LinearTrend::fit(&[10.0, 7.0]).unwrap();
        assert!((trend.slope + 3.0).abs() < EPS);
        assert!((trend.intercept - 10.0).abs() < EPS);
    }

    #[test]
    fn flat_series_has_zero_slope() {
        let trend = LinearTrend::fit(&[50.0; 8]).unwrap();
        assert_eq!(trend.slope, 0.0);
        assert!((trend.intercept - 50.0).abs() < EPS);
    }

    #[test]
    fn noisy_series_matches_hand_computation() {
        // x = 0..4, y = [1, 3, 2, 5]; x̄ = 1.5, ȳ = 2.75
        // Sxy = (-1.5)(-1.75) + (-0.5)(0.25) + (0.5)(-0.75) + (1.5)(2.25) = 5.5
        // Sxx = 5.0  → slope 1.1, intercept 2.75 - 1.65 = 1.1
        let trend = LinearTrend::fit(&[1.0, 3.0, 2.0, 5.0]).unwrap();
        assert!((trend.slope - 1.1).abs() < EPS);
        assert!((trend.intercept - 1.1).abs() < EPS);
    }

    #[test]
    fn fewer_than_two_points_is_insufficient() {
        for values in [&[][..], &[42.0][..]] {
            match LinearTrend::fit(values) {
                Err(PipelineError::InsufficientData { required, actual }) => {
                    assert_eq!(required, 2);
                    assert_eq!(actual, values.len());
                }
                other => panic!("expected InsufficientData, got {other:?}"),
            }
        }
    }
}
