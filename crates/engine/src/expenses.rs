//! Expense journal rows.
//!
//! A row is a flat record: calendar date, company, free-form category and
//! the amount split per payment method. There is no double-entry here; the
//! journal is the source of truth and reports aggregate it on demand.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub date: NaiveDate,
    pub company_id: Uuid,
    pub category: String,
    pub cash_minor: i64,
    pub card_minor: i64,
    pub comment: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Total across payment methods.
    #[must_use]
    pub fn total_minor(&self) -> i64 {
        self.cash_minor + self.card_minor
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub date: Date,
    pub company_id: String,
    pub category: String,
    pub cash_minor: i64,
    pub card_minor: i64,
    pub comment: Option<String>,
    pub created_by: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            date: ActiveValue::Set(expense.date),
            company_id: ActiveValue::Set(expense.company_id.to_string()),
            category: ActiveValue::Set(expense.category.clone()),
            cash_minor: ActiveValue::Set(expense.cash_minor),
            card_minor: ActiveValue::Set(expense.card_minor),
            comment: ActiveValue::Set(expense.comment.clone()),
            created_by: ActiveValue::Set(expense.created_by.clone()),
            created_at: ActiveValue::Set(expense.created_at),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "expense")?,
            date: model.date,
            company_id: parse_uuid(&model.company_id, "company")?,
            category: model.category,
            cash_minor: model.cash_minor,
            card_minor: model.card_minor,
            comment: model.comment,
            created_by: model.created_by,
            created_at: model.created_at,
        })
    }
}
