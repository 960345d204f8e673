//! Staff reference table (salaried employees, not shift operators).

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: Uuid,
    pub name: String,
    pub monthly_salary_minor: i64,
    pub active: bool,
}

impl StaffMember {
    pub fn new(name: String, monthly_salary_minor: i64) -> ResultEngine<Self> {
        if monthly_salary_minor < 0 {
            return Err(EngineError::InvalidAmount(
                "monthly_salary_minor must be >= 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            monthly_salary_minor,
            active: true,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub monthly_salary_minor: i64,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&StaffMember> for ActiveModel {
    fn from(staff: &StaffMember) -> Self {
        Self {
            id: ActiveValue::Set(staff.id.to_string()),
            name: ActiveValue::Set(staff.name.clone()),
            monthly_salary_minor: ActiveValue::Set(staff.monthly_salary_minor),
            active: ActiveValue::Set(staff.active),
        }
    }
}

impl TryFrom<Model> for StaffMember {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "staff")?,
            name: model.name,
            monthly_salary_minor: model.monthly_salary_minor,
            active: model.active,
        })
    }
}
