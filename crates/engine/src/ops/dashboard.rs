//! Dashboard aggregation: bucketed totals, summary statistics, anomaly
//! flags and a next-bucket forecast, all derived from the same row scan.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sea_orm::{QueryFilter, QuerySelect, prelude::*};

use crate::{
    ResultEngine, expenses, incomes,
    stats::{Granularity, RunningStats, bucket_start, fit_trend, next_bucket, scan_anomalies},
    util::ensure_date_range,
};

use super::{Engine, MAX_EXPORT_ROWS};

/// Z-score threshold used when the caller does not supply one.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 2.0;

/// One calendar bucket of the dashboard series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardBucket {
    pub start: NaiveDate,
    pub income_minor: i64,
    pub expense_minor: i64,
    pub net_minor: i64,
}

/// Summary statistics over the per-bucket net series.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardSummary {
    pub buckets: u64,
    pub mean_net: f64,
    pub std_dev_net: f64,
    pub stability_index: f64,
}

/// A bucket whose net deviates beyond the z-score threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct BucketAnomaly {
    pub start: NaiveDate,
    pub net_minor: i64,
    pub zscore: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub granularity: Granularity,
    pub buckets: Vec<DashboardBucket>,
    pub summary: DashboardSummary,
    pub anomalies: Vec<BucketAnomaly>,
    /// Least-squares extrapolation of net one bucket past the range, absent
    /// with fewer than two buckets.
    pub forecast_net_minor: Option<i64>,
}

impl Engine {
    /// Aggregates both journals over `[from, to]` into calendar buckets.
    ///
    /// Buckets without rows appear with zero totals so the series has no
    /// gaps. Rows of extra companies are excluded unless `include_extra`.
    pub async fn dashboard(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        granularity: Granularity,
        include_extra: bool,
        anomaly_threshold: Option<f64>,
    ) -> ResultEngine<Dashboard> {
        ensure_date_range(Some(from), Some(to))?;
        let threshold = anomaly_threshold.unwrap_or(DEFAULT_ANOMALY_THRESHOLD);

        let extra_ids = if include_extra {
            Default::default()
        } else {
            self.extra_company_ids().await?
        };

        // Pre-fill every bucket in range so the series is gapless.
        let mut totals: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
        let mut bucket = bucket_start(from, granularity);
        while bucket <= to {
            totals.insert(bucket, (0, 0));
            bucket = next_bucket(bucket, granularity);
        }

        let mut income_query = incomes::Entity::find()
            .filter(incomes::Column::Date.gte(from))
            .filter(incomes::Column::Date.lte(to))
            .limit(MAX_EXPORT_ROWS);
        if !extra_ids.is_empty() {
            income_query =
                income_query.filter(incomes::Column::CompanyId.is_not_in(extra_ids.iter().cloned()));
        }
        for model in income_query.all(&self.database).await? {
            let key = bucket_start(model.date, granularity);
            totals.entry(key).or_default().0 += model.cash_minor + model.card_minor;
        }

        let mut expense_query = expenses::Entity::find()
            .filter(expenses::Column::Date.gte(from))
            .filter(expenses::Column::Date.lte(to))
            .limit(MAX_EXPORT_ROWS);
        if !extra_ids.is_empty() {
            expense_query = expense_query
                .filter(expenses::Column::CompanyId.is_not_in(extra_ids.iter().cloned()));
        }
        for model in expense_query.all(&self.database).await? {
            let key = bucket_start(model.date, granularity);
            totals.entry(key).or_default().1 += model.cash_minor + model.card_minor;
        }

        let buckets: Vec<DashboardBucket> = totals
            .into_iter()
            .map(|(start, (income_minor, expense_minor))| DashboardBucket {
                start,
                income_minor,
                expense_minor,
                net_minor: income_minor - expense_minor,
            })
            .collect();

        let net_series: Vec<f64> = buckets.iter().map(|b| b.net_minor as f64).collect();

        let mut stats = RunningStats::new();
        stats.extend(net_series.iter().copied());
        let summary = DashboardSummary {
            buckets: stats.count(),
            mean_net: stats.mean(),
            std_dev_net: stats.std_dev(),
            stability_index: stats.stability_index(),
        };

        let anomalies = scan_anomalies(&net_series, threshold)
            .into_iter()
            .map(|a| BucketAnomaly {
                start: buckets[a.index].start,
                net_minor: buckets[a.index].net_minor,
                zscore: a.zscore,
            })
            .collect();

        let forecast_net_minor = fit_trend(&net_series)
            .map(|trend| trend.forecast_next(net_series.len()).round() as i64);

        Ok(Dashboard {
            granularity,
            buckets,
            summary,
            anomalies,
            forecast_net_minor,
        })
    }
}
