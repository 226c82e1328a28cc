//! Running mean, sample deviation, and maximum
//!
//! Uses Welford's online update so long benchmark series with large absolute
//! durations do not lose precision to cancellation.

/// Single-pass accumulator for one numeric column of one group
///
/// Every statistic is `None` when it is undefined for the values seen so
/// far: the mean and maximum of an empty accumulator, and the sample
/// standard deviation of fewer than two values.
///
/// ```
/// use sketchcmp::statistics::RunningStats;
///
/// let mut stats = RunningStats::new();
/// stats.add(42.0);
///
/// assert_eq!(stats.mean(), Some(42.0));
/// assert_eq!(stats.sample_stddev(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    /// Sum of squared differences from the mean (M2)
    m2: f64,
    max: f64,
}

impl Default for RunningStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningStats {
    /// Create a new empty statistics accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            max: f64::NEG_INFINITY,
        }
    }

    /// Add a value
    ///
    /// NaN is skipped, matching how missing cells are treated.
    pub fn add(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }

        self.count += 1;
        if value > self.max {
            self.max = value;
        }

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Number of values accepted
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Arithmetic mean; `None` when empty
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Unbiased (n - 1) variance
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count > 1).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Square root of [`RunningStats::sample_variance`]
    pub fn sample_stddev(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }

    /// Largest value seen; `None` when empty
    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }
}
