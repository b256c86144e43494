//! Descriptive statistics over a sample of values

/// Accumulates values and answers descriptive statistics over them.
///
/// Every statistic of an empty accumulator is `NaN`.
#[derive(Debug, Clone, Default)]
pub struct DescriptiveStats {
    values: Vec<f64>,
}

impl DescriptiveStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_value(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
    }

    /// Bias-corrected (n - 1) standard deviation; zero for a single value
    pub fn standard_deviation(&self) -> f64 {
        match self.values.len() {
            0 => f64::NAN,
            1 => 0.0,
            n => {
                let mean = self.mean();
                let squares: f64 = self.values.iter().map(|v| (v - mean).powi(2)).sum();
                (squares / (n - 1) as f64).sqrt()
            }
        }
    }

    /// Estimate the `p`th percentile, `p` in `(0, 100]`.
    ///
    /// Uses the position `p * (n + 1) / 100` with linear interpolation
    /// between neighbouring order statistics, clamped to the minimum and
    /// maximum at the ends. Out-of-range `p` yields `NaN`.
    pub fn percentile(&self, p: f64) -> f64 {
        if self.values.is_empty() || !(p > 0.0 && p <= 100.0) {
            return f64::NAN;
        }

        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        if n == 1 {
            return sorted[0];
        }

        let pos = p * (n as f64 + 1.0) / 100.0;
        if pos < 1.0 {
            return sorted[0];
        }
        if pos >= n as f64 {
            return sorted[n - 1];
        }

        let floor = pos.floor();
        let lower = sorted[floor as usize - 1];
        let upper = sorted[floor as usize];
        lower + (pos - floor) * (upper - lower)
    }
}

impl Extend<f64> for DescriptiveStats {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl FromIterator<f64> for DescriptiveStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(values: &[f64]) -> DescriptiveStats {
        values.iter().copied().collect()
    }

    #[test]
    fn test_empty_accumulator_is_nan() {
        let stats = DescriptiveStats::new();
        assert!(stats.is_empty());
        assert!(stats.mean().is_nan());
        assert!(stats.min().is_nan());
        assert!(stats.max().is_nan());
        assert!(stats.standard_deviation().is_nan());
        assert!(stats.percentile(50.0).is_nan());
    }

    #[test]
    fn test_basic_statistics() {
        let stats = sample(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        assert_eq!(stats.count(), 5);
        assert_eq!(stats.mean(), 30.0);
        assert_eq!(stats.min(), 10.0);
        assert_eq!(stats.max(), 50.0);
        assert_eq!(stats.percentile(50.0), 30.0);
        assert!((stats.standard_deviation() - 250f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_single_value() {
        let stats = sample(&[42.0]);
        assert_eq!(stats.standard_deviation(), 0.0);
        assert_eq!(stats.percentile(50.0), 42.0);
        assert_eq!(stats.percentile(1.0), 42.0);
    }

    #[test]
    fn test_percentile_interpolates_even_count() {
        let stats = sample(&[40.0, 10.0, 30.0, 20.0]);
        assert_eq!(stats.percentile(50.0), 25.0);
    }

    #[test]
    fn test_percentile_clamps_at_ends() {
        let stats = sample(&[1.0, 2.0, 3.0]);
        assert_eq!(stats.percentile(10.0), 1.0);
        assert_eq!(stats.percentile(100.0), 3.0);
    }

    #[test]
    fn test_percentile_rejects_out_of_range() {
        let stats = sample(&[1.0, 2.0]);
        assert!(stats.percentile(0.0).is_nan());
        assert!(stats.percentile(150.0).is_nan());
    }
}
