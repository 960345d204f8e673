//! Income journal rows.
//!
//! Income is attributed to an operator and a work period (day/night shift)
//! on a given date, split per payment method.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

/// Work period an income row is attributed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Day,
    Night,
}

impl Shift {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }
}

impl TryFrom<&str> for Shift {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "day" => Ok(Self::Day),
            "night" => Ok(Self::Night),
            other => Err(EngineError::InvalidAmount(format!(
                "invalid shift: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    pub id: Uuid,
    pub date: NaiveDate,
    pub company_id: Uuid,
    pub operator_id: Uuid,
    pub shift: Shift,
    pub cash_minor: i64,
    pub card_minor: i64,
    pub comment: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Income {
    /// Total across payment methods.
    #[must_use]
    pub fn total_minor(&self) -> i64 {
        self.cash_minor + self.card_minor
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "incomes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub date: Date,
    pub company_id: String,
    pub operator_id: String,
    pub shift: String,
    pub cash_minor: i64,
    pub card_minor: i64,
    pub comment: Option<String>,
    pub created_by: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Income> for ActiveModel {
    fn from(income: &Income) -> Self {
        Self {
            id: ActiveValue::Set(income.id.to_string()),
            date: ActiveValue::Set(income.date),
            company_id: ActiveValue::Set(income.company_id.to_string()),
            operator_id: ActiveValue::Set(income.operator_id.to_string()),
            shift: ActiveValue::Set(income.shift.as_str().to_string()),
            cash_minor: ActiveValue::Set(income.cash_minor),
            card_minor: ActiveValue::Set(income.card_minor),
            comment: ActiveValue::Set(income.comment.clone()),
            created_by: ActiveValue::Set(income.created_by.clone()),
            created_at: ActiveValue::Set(income.created_at),
        }
    }
}

impl TryFrom<Model> for Income {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "income")?,
            date: model.date,
            company_id: parse_uuid(&model.company_id, "company")?,
            operator_id: parse_uuid(&model.operator_id, "operator")?,
            shift: Shift::try_from(model.shift.as_str())?,
            cash_minor: model.cash_minor,
            card_minor: model.card_minor,
            comment: model.comment,
            created_by: model.created_by,
            created_at: model.created_at,
        })
    }
}
