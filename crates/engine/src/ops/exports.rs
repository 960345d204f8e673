//! Export assembly: resolve reference names and hand rows to the CSV
//! builders. Row counts are capped at `MAX_EXPORT_ROWS`.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{
    ResultEngine, Shift, export, expenses, incomes,
    util::ensure_date_range,
};

use super::{Engine, MAX_EXPORT_ROWS};

impl Engine {
    /// Name lookup for companies, keyed by stored id.
    async fn company_names(&self) -> ResultEngine<HashMap<String, String>> {
        let companies = self.list_companies(true).await?;
        Ok(companies
            .into_iter()
            .map(|c| (c.id.to_string(), c.name))
            .collect())
    }

    async fn operator_names(&self) -> ResultEngine<HashMap<String, String>> {
        let operators = self.list_operators(true).await?;
        Ok(operators
            .into_iter()
            .map(|o| (o.id.to_string(), o.name))
            .collect())
    }

    /// Expenses export: `date;company;category;cash;card;total;comment`.
    pub async fn export_expenses_csv(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ResultEngine<Vec<u8>> {
        ensure_date_range(Some(from), Some(to))?;
        let names = self.company_names().await?;

        let models = expenses::Entity::find()
            .filter(expenses::Column::Date.gte(from))
            .filter(expenses::Column::Date.lte(to))
            .order_by_asc(expenses::Column::Date)
            .order_by_asc(expenses::Column::Id)
            .limit(MAX_EXPORT_ROWS)
            .all(&self.database)
            .await?;

        let rows: Vec<export::ExpenseRow> = models
            .into_iter()
            .map(|model| {
                let company = names.get(&model.company_id).cloned().unwrap_or_default();
                export::ExpenseRow::new(
                    model.date,
                    company,
                    model.category,
                    model.cash_minor,
                    model.card_minor,
                    model.comment,
                )
            })
            .collect();

        export::write_csv(&rows)
    }

    /// Incomes export: `date;company;operator;shift;cash;card;total;comment`.
    pub async fn export_incomes_csv(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ResultEngine<Vec<u8>> {
        ensure_date_range(Some(from), Some(to))?;
        let companies = self.company_names().await?;
        let operators = self.operator_names().await?;

        let models = incomes::Entity::find()
            .filter(incomes::Column::Date.gte(from))
            .filter(incomes::Column::Date.lte(to))
            .order_by_asc(incomes::Column::Date)
            .order_by_asc(incomes::Column::Id)
            .limit(MAX_EXPORT_ROWS)
            .all(&self.database)
            .await?;

        let mut rows = Vec::with_capacity(models.len());
        for model in models {
            let company = companies.get(&model.company_id).cloned().unwrap_or_default();
            let operator = operators
                .get(&model.operator_id)
                .cloned()
                .unwrap_or_default();
            let shift = Shift::try_from(model.shift.as_str())?;
            rows.push(export::IncomeRow::new(
                model.date,
                company,
                operator,
                shift,
                model.cash_minor,
                model.card_minor,
                model.comment,
            ));
        }

        export::write_csv(&rows)
    }

    /// Operator payroll export:
    /// `operator;shifts;revenue;base;commission;adjustments;total`.
    pub async fn export_operator_payroll_csv(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ResultEngine<Vec<u8>> {
        let payroll = self.operator_payroll(from, to).await?;

        let rows: Vec<export::PayrollRow> = payroll
            .into_iter()
            .map(|entry| export::PayrollRow {
                operator: entry.name,
                shifts: entry.shifts_worked,
                revenue: crate::Money::new(entry.revenue_minor).to_string(),
                base: crate::Money::new(entry.base_minor).to_string(),
                commission: crate::Money::new(entry.commission_minor).to_string(),
                adjustments: crate::Money::new(entry.adjustments_minor).to_string(),
                total: crate::Money::new(entry.total_due_minor).to_string(),
            })
            .collect();

        export::write_csv(&rows)
    }
}
