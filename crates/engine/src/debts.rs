//! Debt tracking (money owed to or by the business).

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtDirection {
    OwedToUs,
    OwedByUs,
}

impl DebtDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OwedToUs => "owed_to_us",
            Self::OwedByUs => "owed_by_us",
        }
    }
}

impl TryFrom<&str> for DebtDirection {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "owed_to_us" => Ok(Self::OwedToUs),
            "owed_by_us" => Ok(Self::OwedByUs),
            other => Err(EngineError::InvalidAmount(format!(
                "invalid debt direction: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub id: Uuid,
    pub counterparty: String,
    pub direction: DebtDirection,
    pub amount_minor: i64,
    pub opened_on: NaiveDate,
    pub settled_on: Option<NaiveDate>,
    pub note: Option<String>,
}

impl Debt {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.settled_on.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "debts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub counterparty: String,
    pub direction: String,
    pub amount_minor: i64,
    pub opened_on: Date,
    pub settled_on: Option<Date>,
    pub note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Debt> for ActiveModel {
    fn from(debt: &Debt) -> Self {
        Self {
            id: ActiveValue::Set(debt.id.to_string()),
            counterparty: ActiveValue::Set(debt.counterparty.clone()),
            direction: ActiveValue::Set(debt.direction.as_str().to_string()),
            amount_minor: ActiveValue::Set(debt.amount_minor),
            opened_on: ActiveValue::Set(debt.opened_on),
            settled_on: ActiveValue::Set(debt.settled_on),
            note: ActiveValue::Set(debt.note.clone()),
        }
    }
}

impl TryFrom<Model> for Debt {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "debt")?,
            counterparty: model.counterparty,
            direction: DebtDirection::try_from(model.direction.as_str())?,
            amount_minor: model.amount_minor,
            opened_on: model.opened_on,
            settled_on: model.settled_on,
            note: model.note,
        })
    }
}
