//! Tax estimation over the journals.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sea_orm::{QueryFilter, QuerySelect, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, ResultEngine, expenses, incomes,
    stats::{Granularity, bucket_start},
    util::ensure_date_range,
};

use super::{Engine, MAX_EXPORT_ROWS};

/// Taxable-base scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxScheme {
    /// Base is gross income.
    Turnover,
    /// Base is income minus expenses, floored at zero.
    Profit,
}

impl TaxScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Turnover => "turnover",
            Self::Profit => "profit",
        }
    }
}

impl TryFrom<&str> for TaxScheme {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "turnover" => Ok(Self::Turnover),
            "profit" => Ok(Self::Profit),
            other => Err(EngineError::InvalidAmount(format!(
                "invalid tax scheme: {other}"
            ))),
        }
    }
}

/// Per-calendar-month slice of the estimate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaxMonth {
    pub month: NaiveDate,
    pub base_minor: i64,
    pub tax_minor: i64,
}

/// Tax estimate over an inclusive date range.
///
/// Months are estimated independently; with the profit scheme their sum can
/// exceed the range total because loss months floor at zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaxEstimate {
    pub scheme: TaxScheme,
    pub rate_bps: i64,
    pub base_minor: i64,
    pub tax_minor: i64,
    pub months: Vec<TaxMonth>,
}

fn tax_for(base_minor: i64, rate_bps: i64) -> i64 {
    base_minor * rate_bps / 10_000
}

impl Engine {
    /// Estimates tax due over `[from, to]` at `rate_bps` basis points.
    ///
    /// Rows attributed to extra companies are excluded from the base unless
    /// `include_extra` is set.
    pub async fn estimate_taxes(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        scheme: TaxScheme,
        rate_bps: i64,
        include_extra: bool,
    ) -> ResultEngine<TaxEstimate> {
        ensure_date_range(Some(from), Some(to))?;
        if !(0..=10_000).contains(&rate_bps) {
            return Err(EngineError::InvalidAmount(
                "rate_bps must be within 0..=10000".to_string(),
            ));
        }

        let extra_ids = if include_extra {
            Default::default()
        } else {
            self.extra_company_ids().await?
        };

        let mut income_query = incomes::Entity::find()
            .filter(incomes::Column::Date.gte(from))
            .filter(incomes::Column::Date.lte(to))
            .limit(MAX_EXPORT_ROWS);
        if !extra_ids.is_empty() {
            income_query =
                income_query.filter(incomes::Column::CompanyId.is_not_in(extra_ids.iter().cloned()));
        }
        let income_models = income_query.all(&self.database).await?;

        // (income, expense) totals per calendar month.
        let mut months: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
        for model in income_models {
            let month = bucket_start(model.date, Granularity::Month);
            months.entry(month).or_default().0 += model.cash_minor + model.card_minor;
        }

        if scheme == TaxScheme::Profit {
            let mut expense_query = expenses::Entity::find()
                .filter(expenses::Column::Date.gte(from))
                .filter(expenses::Column::Date.lte(to))
                .limit(MAX_EXPORT_ROWS);
            if !extra_ids.is_empty() {
                expense_query = expense_query
                    .filter(expenses::Column::CompanyId.is_not_in(extra_ids.iter().cloned()));
            }
            for model in expense_query.all(&self.database).await? {
                let month = bucket_start(model.date, Granularity::Month);
                months.entry(month).or_default().1 += model.cash_minor + model.card_minor;
            }
        }

        let total_income: i64 = months.values().map(|(income, _)| income).sum();
        let total_expense: i64 = months.values().map(|(_, expense)| expense).sum();
        let base_minor = match scheme {
            TaxScheme::Turnover => total_income,
            TaxScheme::Profit => (total_income - total_expense).max(0),
        };

        let months = months
            .into_iter()
            .map(|(month, (income, expense))| {
                let month_base = match scheme {
                    TaxScheme::Turnover => income,
                    TaxScheme::Profit => (income - expense).max(0),
                };
                TaxMonth {
                    month,
                    base_minor: month_base,
                    tax_minor: tax_for(month_base, rate_bps),
                }
            })
            .collect();

        Ok(TaxEstimate {
            scheme,
            rate_bps,
            base_minor,
            tax_minor: tax_for(base_minor, rate_bps),
            months,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_truncates_toward_zero() {
        assert_eq!(tax_for(10_000, 500), 500);
        assert_eq!(tax_for(999, 500), 49);
        assert_eq!(tax_for(0, 500), 0);
    }
}
