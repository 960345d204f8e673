//! Income journal API endpoints.

use api_types::Shift as ApiShift;
use api_types::expense::RowCreated;
use api_types::income::{IncomeList, IncomeListResponse, IncomeNew, IncomeUpdate, IncomeView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};
use engine::users;

pub(crate) fn map_shift(shift: ApiShift) -> engine::Shift {
    match shift {
        ApiShift::Day => engine::Shift::Day,
        ApiShift::Night => engine::Shift::Night,
    }
}

fn map_shift_back(shift: engine::Shift) -> ApiShift {
    match shift {
        engine::Shift::Day => ApiShift::Day,
        engine::Shift::Night => ApiShift::Night,
    }
}

fn view(income: engine::Income) -> IncomeView {
    IncomeView {
        id: income.id,
        date: income.date,
        company_id: income.company_id,
        operator_id: income.operator_id,
        shift: map_shift_back(income.shift),
        cash_minor: income.cash_minor,
        card_minor: income.card_minor,
        total_minor: income.total_minor(),
        comment: income.comment,
    }
}

pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<IncomeNew>,
) -> Result<(StatusCode, Json<RowCreated>), ServerError> {
    let id = state
        .engine
        .add_income(engine::NewIncome {
            date: payload.date,
            company_id: payload.company_id,
            operator_id: payload.operator_id,
            shift: map_shift(payload.shift),
            cash_minor: payload.cash_minor,
            card_minor: payload.card_minor,
            comment: payload.comment,
            created_by: user.username,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(RowCreated { id })))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<IncomeUpdate>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .update_income(engine::UpdateIncomeCmd {
            income_id: id,
            date: payload.date,
            company_id: payload.company_id,
            operator_id: payload.operator_id,
            shift: map_shift(payload.shift),
            cash_minor: payload.cash_minor,
            card_minor: payload.card_minor,
            comment: payload.comment,
        })
        .await?;
    Ok(StatusCode::OK)
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_income(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list(
    State(state): State<ServerState>,
    Json(payload): Json<IncomeList>,
) -> Result<Json<IncomeListResponse>, ServerError> {
    let filter = engine::IncomeListFilter {
        from: payload.from,
        to: payload.to,
        company_id: payload.company_id,
        operator_id: payload.operator_id,
        shift: payload.shift.map(map_shift),
    };

    let (rows, next_cursor) = state
        .engine
        .list_incomes(&filter, payload.limit.unwrap_or(50), payload.cursor.as_deref())
        .await?;

    Ok(Json(IncomeListResponse {
        incomes: rows.into_iter().map(view).collect(),
        next_cursor,
    }))
}
