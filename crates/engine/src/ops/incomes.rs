//! Income journal operations.

use chrono::{NaiveDate, Utc};
use sea_orm::{Condition, QueryFilter, QueryOrder, QuerySelect, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Income, ResultEngine, Shift, incomes,
    util::{ensure_date_range, normalize_optional_text, validate_method_amounts},
};

use super::{Engine, JournalCursor, clamp_page_limit};

/// Create an income row attributed to an operator and shift.
#[derive(Clone, Debug)]
pub struct NewIncome {
    pub date: NaiveDate,
    pub company_id: Uuid,
    pub operator_id: Uuid,
    pub shift: Shift,
    pub cash_minor: i64,
    pub card_minor: i64,
    pub comment: Option<String>,
    pub created_by: String,
}

/// Replace the mutable fields of an income row.
#[derive(Clone, Debug)]
pub struct UpdateIncomeCmd {
    pub income_id: Uuid,
    pub date: NaiveDate,
    pub company_id: Uuid,
    pub operator_id: Uuid,
    pub shift: Shift,
    pub cash_minor: i64,
    pub card_minor: i64,
    pub comment: Option<String>,
}

/// Filters for listing incomes. Both range bounds are inclusive.
#[derive(Clone, Debug, Default)]
pub struct IncomeListFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub company_id: Option<Uuid>,
    pub operator_id: Option<Uuid>,
    pub shift: Option<Shift>,
}

impl Engine {
    pub async fn add_income(&self, cmd: NewIncome) -> ResultEngine<Uuid> {
        validate_method_amounts(cmd.cash_minor, cmd.card_minor)?;
        self.require_company(cmd.company_id).await?;
        self.require_operator(cmd.operator_id).await?;

        let income = Income {
            id: Uuid::new_v4(),
            date: cmd.date,
            company_id: cmd.company_id,
            operator_id: cmd.operator_id,
            shift: cmd.shift,
            cash_minor: cmd.cash_minor,
            card_minor: cmd.card_minor,
            comment: normalize_optional_text(cmd.comment.as_deref()),
            created_by: cmd.created_by,
            created_at: Utc::now(),
        };
        let id = income.id;
        incomes::ActiveModel::from(&income)
            .insert(&self.database)
            .await?;
        Ok(id)
    }

    pub async fn update_income(&self, cmd: UpdateIncomeCmd) -> ResultEngine<()> {
        validate_method_amounts(cmd.cash_minor, cmd.card_minor)?;
        self.require_company(cmd.company_id).await?;
        self.require_operator(cmd.operator_id).await?;

        let model = incomes::Entity::find_by_id(cmd.income_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("income".to_string()))?;
        let existing = Income::try_from(model)?;

        let updated = Income {
            id: existing.id,
            date: cmd.date,
            company_id: cmd.company_id,
            operator_id: cmd.operator_id,
            shift: cmd.shift,
            cash_minor: cmd.cash_minor,
            card_minor: cmd.card_minor,
            comment: normalize_optional_text(cmd.comment.as_deref()),
            created_by: existing.created_by,
            created_at: existing.created_at,
        };
        incomes::ActiveModel::from(&updated)
            .update(&self.database)
            .await?;
        Ok(())
    }

    pub async fn delete_income(&self, income_id: Uuid) -> ResultEngine<()> {
        let result = incomes::Entity::delete_by_id(income_id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("income".to_string()));
        }
        Ok(())
    }

    /// Lists incomes newest-first with opaque cursor pagination.
    pub async fn list_incomes(
        &self,
        filter: &IncomeListFilter,
        limit: u64,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<Income>, Option<String>)> {
        ensure_date_range(filter.from, filter.to)?;
        let limit = clamp_page_limit(limit);

        let mut query = incomes::Entity::find()
            .order_by_desc(incomes::Column::Date)
            .order_by_desc(incomes::Column::Id)
            .limit(limit + 1);

        if let Some(from) = filter.from {
            query = query.filter(incomes::Column::Date.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(incomes::Column::Date.lte(to));
        }
        if let Some(company_id) = filter.company_id {
            query = query.filter(incomes::Column::CompanyId.eq(company_id.to_string()));
        }
        if let Some(operator_id) = filter.operator_id {
            query = query.filter(incomes::Column::OperatorId.eq(operator_id.to_string()));
        }
        if let Some(shift) = filter.shift {
            query = query.filter(incomes::Column::Shift.eq(shift.as_str()));
        }
        if let Some(cursor) = cursor {
            let cursor = JournalCursor::decode(cursor)?;
            query = query.filter(
                Condition::any()
                    .add(incomes::Column::Date.lt(cursor.date))
                    .add(
                        Condition::all()
                            .add(incomes::Column::Date.eq(cursor.date))
                            .add(incomes::Column::Id.lt(cursor.id)),
                    ),
            );
        }

        let mut models = query.all(&self.database).await?;

        let next_cursor = if models.len() as u64 > limit {
            models.truncate(limit as usize);
            models.last().map(|last| {
                JournalCursor {
                    date: last.date,
                    id: last.id.clone(),
                }
                .encode()
            })
        } else {
            None
        };
        let next_cursor = next_cursor.transpose()?;

        let rows = models
            .into_iter()
            .map(Income::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        Ok((rows, next_cursor))
    }
}
