//! CSV export API endpoints.
//!
//! Responses carry the raw `;`-separated, BOM-prefixed bytes with a
//! `text/csv` content type, ready to be saved as a file by the client.

use api_types::export::ExportQuery;
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
};

use crate::{ServerError, server::ServerState};

fn csv_headers(filename: &str) -> Result<HeaderMap, ServerError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    let disposition = format!("attachment; filename=\"{filename}\"");
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|_| ServerError::Generic("invalid export filename".to_string()))?,
    );
    Ok(headers)
}

pub async fn expenses_csv(
    State(state): State<ServerState>,
    Json(payload): Json<ExportQuery>,
) -> Result<(HeaderMap, Vec<u8>), ServerError> {
    let bytes = state
        .engine
        .export_expenses_csv(payload.from, payload.to)
        .await?;
    Ok((csv_headers("expenses.csv")?, bytes))
}

pub async fn incomes_csv(
    State(state): State<ServerState>,
    Json(payload): Json<ExportQuery>,
) -> Result<(HeaderMap, Vec<u8>), ServerError> {
    let bytes = state
        .engine
        .export_incomes_csv(payload.from, payload.to)
        .await?;
    Ok((csv_headers("incomes.csv")?, bytes))
}

pub async fn payroll_csv(
    State(state): State<ServerState>,
    Json(payload): Json<ExportQuery>,
) -> Result<(HeaderMap, Vec<u8>), ServerError> {
    let bytes = state
        .engine
        .export_operator_payroll_csv(payload.from, payload.to)
        .await?;
    Ok((csv_headers("payroll.csv")?, bytes))
}
