//! Expense journal API endpoints.

use api_types::expense::{
    ExpenseList, ExpenseListResponse, ExpenseNew, ExpenseUpdate, ExpenseView, RowCreated,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};
use engine::users;

fn view(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        date: expense.date,
        company_id: expense.company_id,
        category: expense.category.clone(),
        cash_minor: expense.cash_minor,
        card_minor: expense.card_minor,
        total_minor: expense.total_minor(),
        comment: expense.comment,
    }
}

pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<RowCreated>), ServerError> {
    let id = state
        .engine
        .add_expense(engine::NewExpense {
            date: payload.date,
            company_id: payload.company_id,
            category: payload.category,
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
    Json(payload): Json<ExpenseUpdate>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .update_expense(engine::UpdateExpenseCmd {
            expense_id: id,
            date: payload.date,
            company_id: payload.company_id,
            category: payload.category,
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
    state.engine.delete_expense(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseList>,
) -> Result<Json<ExpenseListResponse>, ServerError> {
    let filter = engine::ExpenseListFilter {
        from: payload.from,
        to: payload.to,
        company_id: payload.company_id,
        category: payload.category,
    };

    let (rows, next_cursor) = state
        .engine
        .list_expenses(&filter, payload.limit.unwrap_or(50), payload.cursor.as_deref())
        .await?;

    Ok(Json(ExpenseListResponse {
        expenses: rows.into_iter().map(view).collect(),
        next_cursor,
    }))
}
