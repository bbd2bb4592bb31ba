/// Summary of a series of per-game values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    /// Number of values summarized.
    pub count: usize,
    pub min: f32,
    pub max: f32,
    /// Arithmetic mean.
    pub mean: f32,
    /// Population standard deviation (N denominator).
    pub std_dev: f32,
}

impl DescriptiveStats {
    /// Summarizes `values`.
    ///
    /// Returns `None` for an empty series.
    ///
    /// # Examples
    ///
    /// ```
    /// # use regimen_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    /// assert_eq!(stats.count, 8);
    /// assert_eq!(stats.min, 2.0);
    /// assert_eq!(stats.max, 9.0);
    /// assert_eq!(stats.mean, 5.0);
    /// assert_eq!(stats.std_dev, 2.0);
    /// assert!(DescriptiveStats::new([]).is_none());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let count = values.len();
        if count == 0 {
            return None;
        }
        let n = count as f32;
        let (min, max) = values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            });
        let mean = values.iter().sum::<f32>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;

        Some(Self {
            count,
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// Mean of `values`, or `0.0` for an empty series.
    #[must_use]
    pub fn mean_or_zero<I>(values: I) -> f32
    where
        I: IntoIterator<Item = f32>,
    {
        Self::new(values).map_or(0.0, |stats| stats.mean)
    }
}
