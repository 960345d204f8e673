//! Reference tables API endpoints (companies, operators, staff).

use api_types::company::{CompaniesResponse, CompanyList, CompanyNew, CompanyView};
use api_types::expense::RowCreated;
use api_types::operator::{OperatorList, OperatorNew, OperatorView, OperatorsResponse};
use api_types::staff::{StaffList, StaffNew, StaffResponse, StaffView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub async fn company_new(
    State(state): State<ServerState>,
    Json(payload): Json<CompanyNew>,
) -> Result<(StatusCode, Json<RowCreated>), ServerError> {
    let id = state
        .engine
        .new_company(&payload.name, payload.extra.unwrap_or(false))
        .await?;
    Ok((StatusCode::CREATED, Json(RowCreated { id })))
}

pub async fn list_companies(
    State(state): State<ServerState>,
    Json(payload): Json<CompanyList>,
) -> Result<Json<CompaniesResponse>, ServerError> {
    let companies = state
        .engine
        .list_companies(payload.include_archived.unwrap_or(false))
        .await?
        .into_iter()
        .map(|company| CompanyView {
            id: company.id,
            name: company.name,
            extra: company.extra,
            archived: company.archived,
        })
        .collect();
    Ok(Json(CompaniesResponse { companies }))
}

pub async fn company_archive(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.archive_company(id).await?;
    Ok(StatusCode::OK)
}

pub async fn operator_new(
    State(state): State<ServerState>,
    Json(payload): Json<OperatorNew>,
) -> Result<(StatusCode, Json<RowCreated>), ServerError> {
    let id = state
        .engine
        .new_operator(
            &payload.name,
            payload.shift_rate_minor,
            payload.revenue_share_bps,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(RowCreated { id })))
}

pub async fn list_operators(
    State(state): State<ServerState>,
    Json(payload): Json<OperatorList>,
) -> Result<Json<OperatorsResponse>, ServerError> {
    let operators = state
        .engine
        .list_operators(payload.include_inactive.unwrap_or(false))
        .await?
        .into_iter()
        .map(|operator| OperatorView {
            id: operator.id,
            name: operator.name,
            shift_rate_minor: operator.shift_rate_minor,
            revenue_share_bps: operator.revenue_share_bps,
            active: operator.active,
        })
        .collect();
    Ok(Json(OperatorsResponse { operators }))
}

pub async fn operator_deactivate(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.deactivate_operator(id).await?;
    Ok(StatusCode::OK)
}

pub async fn staff_new(
    State(state): State<ServerState>,
    Json(payload): Json<StaffNew>,
) -> Result<(StatusCode, Json<RowCreated>), ServerError> {
    let id = state
        .engine
        .new_staff(&payload.name, payload.monthly_salary_minor)
        .await?;
    Ok((StatusCode::CREATED, Json(RowCreated { id })))
}

pub async fn list_staff(
    State(state): State<ServerState>,
    Json(payload): Json<StaffList>,
) -> Result<Json<StaffResponse>, ServerError> {
    let staff = state
        .engine
        .list_staff(payload.include_inactive.unwrap_or(false))
        .await?
        .into_iter()
        .map(|member| StaffView {
            id: member.id,
            name: member.name,
            monthly_salary_minor: member.monthly_salary_minor,
            active: member.active,
        })
        .collect();
    Ok(Json(StaffResponse { staff }))
}

pub async fn staff_deactivate(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.deactivate_staff(id).await?;
    Ok(StatusCode::OK)
}
