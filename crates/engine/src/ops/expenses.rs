//! Expense journal operations.

use chrono::{NaiveDate, Utc};
use sea_orm::{Condition, QueryFilter, QueryOrder, QuerySelect, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Expense, ResultEngine, expenses,
    util::{ensure_date_range, normalize_name, normalize_optional_text, validate_method_amounts},
};

use super::{Engine, JournalCursor, clamp_page_limit};

/// Create an expense row.
#[derive(Clone, Debug)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub company_id: Uuid,
    pub category: String,
    pub cash_minor: i64,
    pub card_minor: i64,
    pub comment: Option<String>,
    pub created_by: String,
}

/// Replace the mutable fields of an expense row.
#[derive(Clone, Debug)]
pub struct UpdateExpenseCmd {
    pub expense_id: Uuid,
    pub date: NaiveDate,
    pub company_id: Uuid,
    pub category: String,
    pub cash_minor: i64,
    pub card_minor: i64,
    pub comment: Option<String>,
}

/// Filters for listing expenses. Both range bounds are inclusive.
#[derive(Clone, Debug, Default)]
pub struct ExpenseListFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub company_id: Option<Uuid>,
    pub category: Option<String>,
}

impl Engine {
    pub async fn add_expense(&self, cmd: NewExpense) -> ResultEngine<Uuid> {
        validate_method_amounts(cmd.cash_minor, cmd.card_minor)?;
        let category = normalize_name(&cmd.category, "category")?;
        self.require_company(cmd.company_id).await?;

        let expense = Expense {
            id: Uuid::new_v4(),
            date: cmd.date,
            company_id: cmd.company_id,
            category,
            cash_minor: cmd.cash_minor,
            card_minor: cmd.card_minor,
            comment: normalize_optional_text(cmd.comment.as_deref()),
            created_by: cmd.created_by,
            created_at: Utc::now(),
        };
        let id = expense.id;
        expenses::ActiveModel::from(&expense)
            .insert(&self.database)
            .await?;
        Ok(id)
    }

    pub async fn update_expense(&self, cmd: UpdateExpenseCmd) -> ResultEngine<()> {
        validate_method_amounts(cmd.cash_minor, cmd.card_minor)?;
        let category = normalize_name(&cmd.category, "category")?;
        self.require_company(cmd.company_id).await?;

        let model = expenses::Entity::find_by_id(cmd.expense_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("expense".to_string()))?;
        let existing = Expense::try_from(model)?;

        let updated = Expense {
            id: existing.id,
            date: cmd.date,
            company_id: cmd.company_id,
            category,
            cash_minor: cmd.cash_minor,
            card_minor: cmd.card_minor,
            comment: normalize_optional_text(cmd.comment.as_deref()),
            created_by: existing.created_by,
            created_at: existing.created_at,
        };
        expenses::ActiveModel::from(&updated)
            .update(&self.database)
            .await?;
        Ok(())
    }

    pub async fn delete_expense(&self, expense_id: Uuid) -> ResultEngine<()> {
        let result = expenses::Entity::delete_by_id(expense_id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("expense".to_string()));
        }
        Ok(())
    }

    /// Lists expenses newest-first with opaque cursor pagination.
    ///
    /// Returns the page and, when more rows exist, the cursor for the next
    /// (older) page. The page size is clamped to `MAX_LIST_ROWS`.
    pub async fn list_expenses(
        &self,
        filter: &ExpenseListFilter,
        limit: u64,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<Expense>, Option<String>)> {
        ensure_date_range(filter.from, filter.to)?;
        let limit = clamp_page_limit(limit);

        let mut query = expenses::Entity::find()
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::Id)
            .limit(limit + 1);

        if let Some(from) = filter.from {
            query = query.filter(expenses::Column::Date.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(expenses::Column::Date.lte(to));
        }
        if let Some(company_id) = filter.company_id {
            query = query.filter(expenses::Column::CompanyId.eq(company_id.to_string()));
        }
        if let Some(category) = &filter.category {
            query = query.filter(expenses::Column::Category.eq(category.clone()));
        }
        if let Some(cursor) = cursor {
            let cursor = JournalCursor::decode(cursor)?;
            query = query.filter(
                Condition::any()
                    .add(expenses::Column::Date.lt(cursor.date))
                    .add(
                        Condition::all()
                            .add(expenses::Column::Date.eq(cursor.date))
                            .add(expenses::Column::Id.lt(cursor.id)),
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
            .map(Expense::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        Ok((rows, next_cursor))
    }
}
