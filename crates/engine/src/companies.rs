//! Companies (revenue streams) reference table.
//!
//! A company is a point of sale the journals attribute rows to. Companies
//! flagged as `extra` are secondary revenue streams (gaming zones) that
//! aggregate reports exclude unless explicitly requested.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Stable identifier, generated once and persisted so the company can be
    /// renamed without breaking journal references.
    pub id: Uuid,
    pub name: String,
    /// Secondary revenue stream, conditionally excluded from aggregates.
    pub extra: bool,
    pub archived: bool,
}

impl Company {
    pub fn new(name: String, extra: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            extra,
            archived: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub extra: bool,
    pub archived: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Company> for ActiveModel {
    fn from(company: &Company) -> Self {
        Self {
            id: ActiveValue::Set(company.id.to_string()),
            name: ActiveValue::Set(company.name.clone()),
            extra: ActiveValue::Set(company.extra),
            archived: ActiveValue::Set(company.archived),
        }
    }
}

impl TryFrom<Model> for Company {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "company")?,
            name: model.name,
            extra: model.extra,
            archived: model.archived,
        })
    }
}
