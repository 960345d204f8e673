//! Debt operations.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, QuerySelect, prelude::*};
use uuid::Uuid;

use crate::{
    Debt, DebtDirection, EngineError, ResultEngine, debts,
    util::{normalize_name, normalize_optional_text},
};

use super::{Engine, MAX_EXPORT_ROWS};

/// Open a debt.
#[derive(Clone, Debug)]
pub struct NewDebt {
    pub counterparty: String,
    pub direction: DebtDirection,
    pub amount_minor: i64,
    pub opened_on: NaiveDate,
    pub note: Option<String>,
}

/// Filters for listing debts.
#[derive(Clone, Copy, Debug, Default)]
pub struct DebtFilter {
    pub open_only: bool,
    pub direction: Option<DebtDirection>,
}

impl Engine {
    pub async fn open_debt(&self, cmd: NewDebt) -> ResultEngine<Uuid> {
        if cmd.amount_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "debt amount must be > 0".to_string(),
            ));
        }
        let counterparty = normalize_name(&cmd.counterparty, "counterparty")?;

        let debt = Debt {
            id: Uuid::new_v4(),
            counterparty,
            direction: cmd.direction,
            amount_minor: cmd.amount_minor,
            opened_on: cmd.opened_on,
            settled_on: None,
            note: normalize_optional_text(cmd.note.as_deref()),
        };
        let id = debt.id;
        debts::ActiveModel::from(&debt)
            .insert(&self.database)
            .await?;
        Ok(id)
    }

    /// Marks a debt settled. Settling twice or before the open date is
    /// rejected.
    pub async fn settle_debt(&self, debt_id: Uuid, settled_on: NaiveDate) -> ResultEngine<()> {
        let model = debts::Entity::find_by_id(debt_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("debt".to_string()))?;
        let debt = Debt::try_from(model)?;

        if debt.settled_on.is_some() {
            return Err(EngineError::InvalidDate(
                "debt already settled".to_string(),
            ));
        }
        if settled_on < debt.opened_on {
            return Err(EngineError::InvalidDate(
                "settled_on must not precede opened_on".to_string(),
            ));
        }

        let update = debts::ActiveModel {
            id: ActiveValue::Set(debt_id.to_string()),
            settled_on: ActiveValue::Set(Some(settled_on)),
            ..Default::default()
        };
        update.update(&self.database).await?;
        Ok(())
    }

    pub async fn list_debts(&self, filter: DebtFilter) -> ResultEngine<Vec<Debt>> {
        let mut query = debts::Entity::find()
            .order_by_desc(debts::Column::OpenedOn)
            .limit(MAX_EXPORT_ROWS);
        if filter.open_only {
            query = query.filter(debts::Column::SettledOn.is_null());
        }
        if let Some(direction) = filter.direction {
            query = query.filter(debts::Column::Direction.eq(direction.as_str()));
        }

        let models = query.all(&self.database).await?;
        models.into_iter().map(Debt::try_from).collect()
    }
}
