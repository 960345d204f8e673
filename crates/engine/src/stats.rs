//! Shared statistics used by dashboard and payroll reports.
//!
//! Every report aggregates journal rows the same way: group by a calendar
//! bucket, fold the series through a single-pass running mean/variance, then
//! derive the stability index, z-score anomalies and a linear trend from the
//! same numbers. Keeping the arithmetic here keeps the reports consistent
//! with each other.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Calendar bucket size for grouped reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    /// ISO week, Monday start.
    Week,
    Month,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl TryFrom<&str> for Granularity {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(EngineError::InvalidDate(format!(
                "invalid granularity: {other}"
            ))),
        }
    }
}

/// Returns the bucket a date falls into: the date itself, the Monday of its
/// week, or the first day of its month.
#[must_use]
pub fn bucket_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Day => date,
        Granularity::Week => {
            let back = u64::from(date.weekday().num_days_from_monday());
            date.checked_sub_days(Days::new(back)).unwrap_or(date)
        }
        Granularity::Month => date.with_day(1).unwrap_or(date),
    }
}

/// Returns the start of the bucket following `start`.
#[must_use]
pub fn next_bucket(start: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Day => start.checked_add_days(Days::new(1)).unwrap_or(start),
        Granularity::Week => start.checked_add_days(Days::new(7)).unwrap_or(start),
        Granularity::Month => start.checked_add_months(Months::new(1)).unwrap_or(start),
    }
}

/// Single-pass running mean and variance (Welford).
#[derive(Clone, Copy, Debug, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one observation into the accumulator.
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance (n - 1 denominator); 0 with fewer than two values.
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Stability index: `max(0, 1 - stddev/mean) x 100`.
    ///
    /// A UI heuristic, not a rigorous dispersion metric: 100 means perfectly
    /// even values, 0 means the spread swamps the mean. Non-positive means
    /// yield 0 so the index stays meaningful for revenue-like series.
    #[must_use]
    pub fn stability_index(&self) -> f64 {
        if self.count == 0 || self.mean <= 0.0 {
            return 0.0;
        }
        ((1.0 - self.std_dev() / self.mean).max(0.0)) * 100.0
    }
}

impl Extend<f64> for RunningStats {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        for value in iter {
            self.push(value);
        }
    }
}

/// A value flagged by the z-score scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anomaly {
    pub index: usize,
    pub value: f64,
    pub zscore: f64,
}

/// Flags values whose absolute z-score exceeds `threshold`.
///
/// A zero standard deviation yields no anomalies (a flat series has no
/// outliers, and dividing by zero would flag everything).
#[must_use]
pub fn scan_anomalies(values: &[f64], threshold: f64) -> Vec<Anomaly> {
    let mut stats = RunningStats::new();
    stats.extend(values.iter().copied());
    let std_dev = stats.std_dev();
    if std_dev == 0.0 {
        return Vec::new();
    }

    let mean = stats.mean();
    values
        .iter()
        .enumerate()
        .filter_map(|(index, &value)| {
            let zscore = (value - mean) / std_dev;
            (zscore.abs() > threshold).then_some(Anomaly {
                index,
                value,
                zscore,
            })
        })
        .collect()
}

/// Least-squares line over a series indexed 0..n.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    /// Value of the fitted line at position `x`.
    #[must_use]
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Extrapolation one step past the fitted series of length `n`.
    #[must_use]
    pub fn forecast_next(&self, n: usize) -> f64 {
        self.at(n as f64)
    }
}

/// Fits a least-squares line over `values` indexed by position.
///
/// Returns `None` for fewer than two points, where a trend is meaningless.
#[must_use]
pub fn fit_trend(values: &[f64]) -> Option<TrendLine> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n_f;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }

    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    Some(TrendLine {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bucket_start_by_granularity() {
        // 2026-03-11 is a Wednesday.
        let d = date(2026, 3, 11);
        assert_eq!(bucket_start(d, Granularity::Day), d);
        assert_eq!(bucket_start(d, Granularity::Week), date(2026, 3, 9));
        assert_eq!(bucket_start(d, Granularity::Month), date(2026, 3, 1));
    }

    #[test]
    fn next_bucket_steps_calendar_units() {
        assert_eq!(
            next_bucket(date(2026, 1, 31), Granularity::Day),
            date(2026, 2, 1)
        );
        assert_eq!(
            next_bucket(date(2026, 3, 9), Granularity::Week),
            date(2026, 3, 16)
        );
        assert_eq!(
            next_bucket(date(2026, 12, 1), Granularity::Month),
            date(2027, 1, 1)
        );
    }

    #[test]
    fn running_stats_match_two_pass_results() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let mut stats = RunningStats::new();
        stats.extend(values.iter().copied());

        assert_eq!(stats.count(), 8);
        assert!((stats.mean() - 5.0).abs() < 1e-12);
        // Sample variance of the canonical series is 32/7.
        assert!((stats.variance() - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn stability_index_bounds() {
        let mut flat = RunningStats::new();
        flat.extend([100.0, 100.0, 100.0]);
        assert!((flat.stability_index() - 100.0).abs() < 1e-12);

        let mut wild = RunningStats::new();
        wild.extend([1.0, 1000.0, 1.0, 1000.0]);
        assert!(wild.stability_index() >= 0.0);
        assert!(wild.stability_index() < 50.0);

        let mut negative = RunningStats::new();
        negative.extend([-5.0, -10.0]);
        assert_eq!(negative.stability_index(), 0.0);
    }

    #[test]
    fn scan_anomalies_flags_outlier() {
        let values = [10.0, 11.0, 9.0, 10.0, 10.5, 9.5, 60.0, 10.0];
        let anomalies = scan_anomalies(&values, 2.0);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].index, 6);
        assert!(anomalies[0].zscore > 2.0);
    }

    #[test]
    fn scan_anomalies_empty_for_flat_series() {
        assert!(scan_anomalies(&[5.0, 5.0, 5.0], 2.0).is_empty());
        assert!(scan_anomalies(&[], 2.0).is_empty());
    }

    #[test]
    fn fit_trend_recovers_exact_line() {
        let values = [1.0, 3.0, 5.0, 7.0];
        let trend = fit_trend(&values).unwrap();
        assert!((trend.slope - 2.0).abs() < 1e-12);
        assert!((trend.intercept - 1.0).abs() < 1e-12);
        assert!((trend.forecast_next(values.len()) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn fit_trend_needs_two_points() {
        assert!(fit_trend(&[]).is_none());
        assert!(fit_trend(&[42.0]).is_none());
    }
}
