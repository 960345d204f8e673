//! Debts API endpoints.

use api_types::DebtDirection as ApiDirection;
use api_types::debt::{DebtList, DebtNew, DebtSettle, DebtView, DebtsResponse};
use api_types::expense::RowCreated;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_direction(direction: ApiDirection) -> engine::DebtDirection {
    match direction {
        ApiDirection::OwedToUs => engine::DebtDirection::OwedToUs,
        ApiDirection::OwedByUs => engine::DebtDirection::OwedByUs,
    }
}

fn map_direction_back(direction: engine::DebtDirection) -> ApiDirection {
    match direction {
        engine::DebtDirection::OwedToUs => ApiDirection::OwedToUs,
        engine::DebtDirection::OwedByUs => ApiDirection::OwedByUs,
    }
}

pub async fn open(
    State(state): State<ServerState>,
    Json(payload): Json<DebtNew>,
) -> Result<(StatusCode, Json<RowCreated>), ServerError> {
    let id = state
        .engine
        .open_debt(engine::NewDebt {
            counterparty: payload.counterparty,
            direction: map_direction(payload.direction),
            amount_minor: payload.amount_minor,
            opened_on: payload.opened_on,
            note: payload.note,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(RowCreated { id })))
}

pub async fn settle(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DebtSettle>,
) -> Result<StatusCode, ServerError> {
    let settled_on = payload
        .settled_on
        .unwrap_or_else(|| Utc::now().date_naive());
    state.engine.settle_debt(id, settled_on).await?;
    Ok(StatusCode::OK)
}

pub async fn list(
    State(state): State<ServerState>,
    Json(payload): Json<DebtList>,
) -> Result<Json<DebtsResponse>, ServerError> {
    let debts = state
        .engine
        .list_debts(engine::DebtFilter {
            open_only: payload.open_only.unwrap_or(false),
            direction: payload.direction.map(map_direction),
        })
        .await?
        .into_iter()
        .map(|debt| DebtView {
            id: debt.id,
            counterparty: debt.counterparty,
            direction: map_direction_back(debt.direction),
            amount_minor: debt.amount_minor,
            opened_on: debt.opened_on,
            settled_on: debt.settled_on,
            note: debt.note,
        })
        .collect();
    Ok(Json(DebtsResponse { debts }))
}
