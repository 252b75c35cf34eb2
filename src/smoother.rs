//! Weighted temporal smoothing of fused angles.

use crate::fusion::AngleSample;
use std::collections::VecDeque;

/// Weighted moving-average smoother over a bounded per-axis history.
///
/// Recent samples carry linearly more weight than older ones, so the output
/// tracks genuine posture changes faster than a plain moving average while
/// still absorbing single-frame jitter. One smoother serves exactly one
/// posture stream.
pub struct TemporalSmoother {
    window_size: usize,
    neck_history: VecDeque<f64>,
    torso_history: VecDeque<f64>,
}

impl TemporalSmoother {
    /// Create a smoother holding up to `window_size` samples per axis.
    ///
    /// # Panics
    ///
    /// Panics if `window_size` is zero.
    #[must_use]
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "Window size must be greater than 0");
        Self {
            window_size,
            neck_history: VecDeque::with_capacity(window_size),
            torso_history: VecDeque::with_capacity(window_size),
        }
    }

    /// Append one frame's angles and return the weighted average per axis.
    ///
    /// The oldest sample is evicted once the window is full. With a single
    /// sample in the window the input passes through unchanged.
    pub fn smooth(&mut self, neck_angle: f64, torso_angle: f64) -> AngleSample {
        if self.neck_history.len() >= self.window_size {
            self.neck_history.pop_front();
        }
        if self.torso_history.len() >= self.window_size {
            self.torso_history.pop_front();
        }

        self.neck_history.push_back(neck_angle);
        self.torso_history.push_back(torso_angle);

        let weights = linear_weights(self.neck_history.len());
        AngleSample {
            neck: weighted_average(&self.neck_history, &weights),
            torso: weighted_average(&self.torso_history, &weights),
        }
    }

    /// Number of samples currently held per axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neck_history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neck_history.is_empty()
    }

    /// Clear both windows, e.g. at the start of a new exercise session.
    pub fn reset(&mut self) {
        self.neck_history.clear();
        self.torso_history.clear();
    }
}

/// Linear ascending weights `1, 2, ..., len`, normalized to sum to 1.
#[must_use]
pub fn linear_weights(len: usize) -> Vec<f64> {
    let sum = (len * (len + 1)) as f64 / 2.0;
    (1..=len).map(|i| i as f64 / sum).collect()
}

fn weighted_average(values: &VecDeque<f64>, weights: &[f64]) -> f64 {
    values.iter().zip(weights).map(|(value, weight)| value * weight).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sample_passes_through() {
        let mut smoother = TemporalSmoother::new(10);
        let smoothed = smoother.smooth(37.5, 12.25);
        assert_eq!(smoothed.neck, 37.5);
        assert_eq!(smoothed.torso, 12.25);
    }

    #[test]
    fn test_recent_sample_weighs_more() {
        let mut smoother = TemporalSmoother::new(10);
        smoother.smooth(10.0, 20.0);
        let smoothed = smoother.smooth(20.0, 30.0);
        // Weights 1/3 and 2/3: pulled toward the newer sample
        assert!((smoothed.neck - 50.0 / 3.0).abs() < 1e-9);
        assert!((smoothed.torso - 80.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_never_exceeds_capacity() {
        let mut smoother = TemporalSmoother::new(3);
        for i in 0..20 {
            smoother.smooth(f64::from(i), f64::from(i));
            assert!(smoother.len() <= 3);
        }
        assert_eq!(smoother.len(), 3);
    }

    #[test]
    fn test_oldest_sample_evicted() {
        let mut smoother = TemporalSmoother::new(2);
        smoother.smooth(100.0, 100.0);
        smoother.smooth(10.0, 10.0);
        // 100.0 falls out here; only 10.0 and 12.0 remain
        let smoothed = smoother.smooth(12.0, 12.0);
        assert!((smoothed.neck - (10.0 / 3.0 + 24.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_weights_ascend_and_sum_to_one() {
        for len in 1..=20 {
            let weights = linear_weights(len);
            assert_eq!(weights.len(), len);
            for pair in weights.windows(2) {
                assert!(pair[1] > pair[0]);
            }
            let sum: f64 = weights.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_reset_clears_both_axes() {
        let mut smoother = TemporalSmoother::new(5);
        smoother.smooth(40.0, 15.0);
        smoother.smooth(42.0, 17.0);
        smoother.reset();
        assert!(smoother.is_empty());

        // First sample after reset passes through again
        let smoothed = smoother.smooth(33.0, 11.0);
        assert_eq!(smoothed.neck, 33.0);
        assert_eq!(smoothed.torso, 11.0);
    }
}
