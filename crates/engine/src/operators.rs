//! Operators reference table.
//!
//! Operators work day/night shifts and income rows are attributed to them.
//! Pay is a fixed rate per worked shift plus a share of attributed revenue,
//! expressed in basis points.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub id: Uuid,
    pub name: String,
    /// Fixed pay per worked shift, in minor units.
    pub shift_rate_minor: i64,
    /// Commission on attributed revenue, in basis points (0..=10_000).
    pub revenue_share_bps: i64,
    pub active: bool,
}

impl Operator {
    pub fn new(name: String, shift_rate_minor: i64, revenue_share_bps: i64) -> ResultEngine<Self> {
        if shift_rate_minor < 0 {
            return Err(EngineError::InvalidAmount(
                "shift_rate_minor must be >= 0".to_string(),
            ));
        }
        if !(0..=10_000).contains(&revenue_share_bps) {
            return Err(EngineError::InvalidAmount(
                "revenue_share_bps must be within 0..=10000".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            shift_rate_minor,
            revenue_share_bps,
            active: true,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "operators")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub shift_rate_minor: i64,
    pub revenue_share_bps: i64,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Operator> for ActiveModel {
    fn from(operator: &Operator) -> Self {
        Self {
            id: ActiveValue::Set(operator.id.to_string()),
            name: ActiveValue::Set(operator.name.clone()),
            shift_rate_minor: ActiveValue::Set(operator.shift_rate_minor),
            revenue_share_bps: ActiveValue::Set(operator.revenue_share_bps),
            active: ActiveValue::Set(operator.active),
        }
    }
}

impl TryFrom<Model> for Operator {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "operator")?,
            name: model.name,
            shift_rate_minor: model.shift_rate_minor,
            revenue_share_bps: model.revenue_share_bps,
            active: model.active,
        })
    }
}
