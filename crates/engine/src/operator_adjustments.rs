//! Signed payroll adjustments for operators (bonuses and deductions).

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryAdjustment {
    pub id: Uuid,
    pub operator_id: Uuid,
    pub date: NaiveDate,
    /// Positive for a bonus, negative for a deduction. Never zero.
    pub amount_minor: i64,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "operator_salary_adjustments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub operator_id: String,
    pub date: Date,
    pub amount_minor: i64,
    pub reason: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&SalaryAdjustment> for ActiveModel {
    fn from(adjustment: &SalaryAdjustment) -> Self {
        Self {
            id: ActiveValue::Set(adjustment.id.to_string()),
            operator_id: ActiveValue::Set(adjustment.operator_id.to_string()),
            date: ActiveValue::Set(adjustment.date),
            amount_minor: ActiveValue::Set(adjustment.amount_minor),
            reason: ActiveValue::Set(adjustment.reason.clone()),
        }
    }
}

impl TryFrom<Model> for SalaryAdjustment {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "salary adjustment")?,
            operator_id: parse_uuid(&model.operator_id, "operator")?,
            date: model.date,
            amount_minor: model.amount_minor,
            reason: model.reason,
        })
    }
}
