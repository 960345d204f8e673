//! Payroll: per-operator pay over a period, staff salary payments and
//! operator adjustments.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use sea_orm::{QueryFilter, QueryOrder, QuerySelect, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, SalaryAdjustment, SalaryPayment, Shift, incomes,
    operator_adjustments, staff_payments,
    stats::{Granularity, RunningStats, bucket_start, next_bucket},
    util::{ensure_date_range, normalize_name, normalize_optional_text},
};

use super::{Engine, MAX_EXPORT_ROWS};

/// Record a signed adjustment (bonus/deduction) for an operator.
#[derive(Clone, Debug)]
pub struct NewSalaryAdjustment {
    pub operator_id: Uuid,
    pub date: NaiveDate,
    pub amount_minor: i64,
    pub reason: String,
}

/// Record a salary payment to a staff member.
#[derive(Clone, Debug)]
pub struct NewSalaryPayment {
    pub staff_id: Uuid,
    pub date: NaiveDate,
    pub amount_minor: i64,
    pub note: Option<String>,
}

/// Per-operator payroll over an inclusive date range.
///
/// `stability_index` is computed over the operator's per-shift revenue
/// series; a single worked shift reads as perfectly stable.
#[derive(Clone, Debug, PartialEq)]
pub struct OperatorPayroll {
    pub operator_id: Uuid,
    pub name: String,
    pub shifts_worked: u64,
    pub revenue_minor: i64,
    pub base_minor: i64,
    pub commission_minor: i64,
    pub adjustments_minor: i64,
    pub total_due_minor: i64,
    pub stability_index: f64,
}

/// Per-staff accrual vs. payments over an inclusive date range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaffPayroll {
    pub staff_id: Uuid,
    pub name: String,
    pub monthly_salary_minor: i64,
    pub months_accrued: u64,
    pub accrued_minor: i64,
    pub paid_minor: i64,
    pub outstanding_minor: i64,
}

/// Number of calendar months intersecting the inclusive range.
fn months_in_range(from: NaiveDate, to: NaiveDate) -> u64 {
    let mut month = bucket_start(from, Granularity::Month);
    let mut count = 0;
    while month <= to {
        count += 1;
        month = next_bucket(month, Granularity::Month);
    }
    count
}

impl Engine {
    /// Computes payroll for every operator with a shift rate, a revenue
    /// share, and the period's adjustments.
    ///
    /// Active operators always appear; inactive ones only when they have
    /// income rows or adjustments in the range.
    pub async fn operator_payroll(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ResultEngine<Vec<OperatorPayroll>> {
        ensure_date_range(Some(from), Some(to))?;

        let operators = self.list_operators(true).await?;

        let income_models = incomes::Entity::find()
            .filter(incomes::Column::Date.gte(from))
            .filter(incomes::Column::Date.lte(to))
            .order_by_asc(incomes::Column::Date)
            .limit(MAX_EXPORT_ROWS)
            .all(&self.database)
            .await?;

        // Revenue per operator keyed by worked shift, in shift order.
        let mut shift_revenue: HashMap<String, BTreeMap<(NaiveDate, Shift), i64>> = HashMap::new();
        for model in income_models {
            let shift = Shift::try_from(model.shift.as_str())?;
            let per_operator = shift_revenue.entry(model.operator_id.clone()).or_default();
            *per_operator.entry((model.date, shift)).or_insert(0) +=
                model.cash_minor + model.card_minor;
        }

        let adjustment_models = operator_adjustments::Entity::find()
            .filter(operator_adjustments::Column::Date.gte(from))
            .filter(operator_adjustments::Column::Date.lte(to))
            .all(&self.database)
            .await?;
        let mut adjustments: HashMap<String, i64> = HashMap::new();
        for model in adjustment_models {
            *adjustments.entry(model.operator_id).or_insert(0) += model.amount_minor;
        }

        let mut report = Vec::with_capacity(operators.len());
        for operator in operators {
            let key = operator.id.to_string();
            let shifts = shift_revenue.remove(&key).unwrap_or_default();
            let adjustments_minor = adjustments.remove(&key).unwrap_or(0);

            if !operator.active && shifts.is_empty() && adjustments_minor == 0 {
                continue;
            }

            let shifts_worked = shifts.len() as u64;
            let revenue_minor: i64 = shifts.values().sum();
            let base_minor = shifts_worked as i64 * operator.shift_rate_minor;
            let commission_minor = revenue_minor * operator.revenue_share_bps / 10_000;

            let mut stats = RunningStats::new();
            stats.extend(shifts.values().map(|&v| v as f64));

            report.push(OperatorPayroll {
                operator_id: operator.id,
                name: operator.name,
                shifts_worked,
                revenue_minor,
                base_minor,
                commission_minor,
                adjustments_minor,
                total_due_minor: base_minor + commission_minor + adjustments_minor,
                stability_index: stats.stability_index(),
            });
        }

        Ok(report)
    }

    pub async fn record_salary_adjustment(
        &self,
        cmd: NewSalaryAdjustment,
    ) -> ResultEngine<Uuid> {
        if cmd.amount_minor == 0 {
            return Err(EngineError::InvalidAmount(
                "adjustment amount must not be 0".to_string(),
            ));
        }
        let reason = normalize_name(&cmd.reason, "adjustment reason")?;
        self.require_operator(cmd.operator_id).await?;

        let adjustment = SalaryAdjustment {
            id: Uuid::new_v4(),
            operator_id: cmd.operator_id,
            date: cmd.date,
            amount_minor: cmd.amount_minor,
            reason,
        };
        let id = adjustment.id;
        operator_adjustments::ActiveModel::from(&adjustment)
            .insert(&self.database)
            .await?;
        Ok(id)
    }

    pub async fn list_salary_adjustments(
        &self,
        operator_id: Option<Uuid>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> ResultEngine<Vec<SalaryAdjustment>> {
        ensure_date_range(from, to)?;

        let mut query = operator_adjustments::Entity::find()
            .order_by_desc(operator_adjustments::Column::Date)
            .limit(MAX_EXPORT_ROWS);
        if let Some(operator_id) = operator_id {
            query = query
                .filter(operator_adjustments::Column::OperatorId.eq(operator_id.to_string()));
        }
        if let Some(from) = from {
            query = query.filter(operator_adjustments::Column::Date.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(operator_adjustments::Column::Date.lte(to));
        }

        let models = query.all(&self.database).await?;
        models.into_iter().map(SalaryAdjustment::try_from).collect()
    }

    pub async fn record_staff_payment(&self, cmd: NewSalaryPayment) -> ResultEngine<Uuid> {
        if cmd.amount_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "payment amount must be > 0".to_string(),
            ));
        }
        self.require_staff(cmd.staff_id).await?;

        let payment = SalaryPayment {
            id: Uuid::new_v4(),
            staff_id: cmd.staff_id,
            date: cmd.date,
            amount_minor: cmd.amount_minor,
            note: normalize_optional_text(cmd.note.as_deref()),
        };
        let id = payment.id;
        staff_payments::ActiveModel::from(&payment)
            .insert(&self.database)
            .await?;
        Ok(id)
    }

    pub async fn list_staff_payments(
        &self,
        staff_id: Option<Uuid>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> ResultEngine<Vec<SalaryPayment>> {
        ensure_date_range(from, to)?;

        let mut query = staff_payments::Entity::find()
            .order_by_desc(staff_payments::Column::Date)
            .limit(MAX_EXPORT_ROWS);
        if let Some(staff_id) = staff_id {
            query = query.filter(staff_payments::Column::StaffId.eq(staff_id.to_string()));
        }
        if let Some(from) = from {
            query = query.filter(staff_payments::Column::Date.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(staff_payments::Column::Date.lte(to));
        }

        let models = query.all(&self.database).await?;
        models.into_iter().map(SalaryPayment::try_from).collect()
    }

    /// Accrual vs. payments per staff member over an inclusive range.
    ///
    /// A month accrues once it intersects the range, so a range covering a
    /// few days still accrues that month's full salary.
    pub async fn staff_payroll(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ResultEngine<Vec<StaffPayroll>> {
        ensure_date_range(Some(from), Some(to))?;

        let members = self.list_staff(true).await?;
        let months = months_in_range(from, to);

        let payment_models = staff_payments::Entity::find()
            .filter(staff_payments::Column::Date.gte(from))
            .filter(staff_payments::Column::Date.lte(to))
            .all(&self.database)
            .await?;
        let mut paid: HashMap<String, i64> = HashMap::new();
        for model in payment_models {
            *paid.entry(model.staff_id).or_insert(0) += model.amount_minor;
        }

        let mut report = Vec::with_capacity(members.len());
        for member in members {
            let paid_minor = paid.remove(&member.id.to_string()).unwrap_or(0);
            if !member.active && paid_minor == 0 {
                continue;
            }

            let accrued_minor = member.monthly_salary_minor * months as i64;
            report.push(StaffPayroll {
                staff_id: member.id,
                name: member.name,
                monthly_salary_minor: member.monthly_salary_minor,
                months_accrued: months,
                accrued_minor,
                paid_minor,
                outstanding_minor: accrued_minor - paid_minor,
            });
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn months_in_range_counts_intersections() {
        assert_eq!(months_in_range(date(2026, 1, 10), date(2026, 1, 20)), 1);
        assert_eq!(months_in_range(date(2026, 1, 31), date(2026, 2, 1)), 2);
        assert_eq!(months_in_range(date(2025, 11, 5), date(2026, 2, 5)), 4);
    }
}
