//! Recorded salary payments to staff members.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryPayment {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub date: NaiveDate,
    pub amount_minor: i64,
    pub note: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staff_salary_payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub staff_id: String,
    pub date: Date,
    pub amount_minor: i64,
    pub note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&SalaryPayment> for ActiveModel {
    fn from(payment: &SalaryPayment) -> Self {
        Self {
            id: ActiveValue::Set(payment.id.to_string()),
            staff_id: ActiveValue::Set(payment.staff_id.to_string()),
            date: ActiveValue::Set(payment.date),
            amount_minor: ActiveValue::Set(payment.amount_minor),
            note: ActiveValue::Set(payment.note.clone()),
        }
    }
}

impl TryFrom<Model> for SalaryPayment {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "salary payment")?,
            staff_id: parse_uuid(&model.staff_id, "staff")?,
            date: model.date,
            amount_minor: model.amount_minor,
            note: model.note,
        })
    }
}
