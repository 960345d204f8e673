//! Tax estimation API endpoint.

use api_types::TaxScheme as ApiScheme;
use api_types::tax::{TaxEstimateQuery, TaxEstimateResponse, TaxMonthView};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

fn map_scheme(scheme: ApiScheme) -> engine::TaxScheme {
    match scheme {
        ApiScheme::Turnover => engine::TaxScheme::Turnover,
        ApiScheme::Profit => engine::TaxScheme::Profit,
    }
}

fn map_scheme_back(scheme: engine::TaxScheme) -> ApiScheme {
    match scheme {
        engine::TaxScheme::Turnover => ApiScheme::Turnover,
        engine::TaxScheme::Profit => ApiScheme::Profit,
    }
}

pub async fn estimate(
    State(state): State<ServerState>,
    Json(payload): Json<TaxEstimateQuery>,
) -> Result<Json<TaxEstimateResponse>, ServerError> {
    let estimate = state
        .engine
        .estimate_taxes(
            payload.from,
            payload.to,
            map_scheme(payload.scheme),
            payload.rate_bps,
            payload.include_extra.unwrap_or(false),
        )
        .await?;

    Ok(Json(TaxEstimateResponse {
        scheme: map_scheme_back(estimate.scheme),
        rate_bps: estimate.rate_bps,
        base_minor: estimate.base_minor,
        tax_minor: estimate.tax_minor,
        months: estimate
            .months
            .into_iter()
            .map(|month| TaxMonthView {
                month: month.month,
                base_minor: month.base_minor,
                tax_minor: month.tax_minor,
            })
            .collect(),
    }))
}
