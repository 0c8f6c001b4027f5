//! Selection math shared by both search engines.

/// Map `value` into `[0, 1]` relative to observed bounds. Degenerate
/// bounds (max <= min) pass the value through unchanged.
#[inline]
pub fn normalise(value: f32, min: f32, max: f32) -> f32 {
    if max > min {
        (value - min) / (max - min)
    } else {
        value
    }
}

/// Perturb `input` with bounded uniform noise for tie-breaking.
/// `draw` is a uniform sample in `[0, 1)`.
#[inline]
pub fn noise(input: f32, epsilon: f32, draw: f32) -> f32 {
    (input + epsilon) * (1.0 + epsilon * (draw - 0.5))
}

/// Running mean/variance accumulator over the scores seen so far in one
/// selection pass (Welford's method; variance is population variance).
#[derive(Debug, Clone, Default)]
pub struct ScoreStats {
    count: u32,
    mean: f32,
    m2: f32,
}

impl ScoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f32) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f32;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn mean(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    pub fn variance(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.m2 / self.count as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalise_maps_into_unit_range() {
        assert!((normalise(5.0, 0.0, 10.0) - 0.5).abs() < 1e-6);
        assert!((normalise(0.0, 0.0, 10.0)).abs() < 1e-6);
        assert!((normalise(10.0, 0.0, 10.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalise_passes_through_degenerate_bounds() {
        assert!((normalise(3.0, 2.0, 2.0) - 3.0).abs() < 1e-6);
        assert!((normalise(3.0, 5.0, 1.0) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn noise_is_a_small_perturbation() {
        let eps = 1e-6;
        let x = 0.75;
        let perturbed = noise(x, eps, 0.9);
        assert!((perturbed - x).abs() < 1e-4);
    }

    #[test]
    fn noise_orders_equal_inputs_by_draw() {
        let eps = 1e-6;
        let high = noise(1.0, eps, 0.99);
        let low = noise(1.0, eps, 0.01);
        assert!(high > low);
    }

    #[test]
    fn score_stats_mean_and_variance() {
        let mut stats = ScoreStats::new();
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.push(v);
        }
        assert_eq!(stats.count(), 8);
        assert!((stats.mean() - 5.0).abs() < 1e-5);
        assert!((stats.variance() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn score_stats_empty_is_zero() {
        let stats = ScoreStats::new();
        assert!((stats.mean()).abs() < 1e-6);
        assert!((stats.variance()).abs() < 1e-6);
    }
}
