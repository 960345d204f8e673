//! Dashboard API endpoint.

use api_types::Granularity as ApiGranularity;
use api_types::dashboard::{
    AnomalyView, BucketView, DashboardQuery, DashboardResponse, SummaryView,
};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

fn map_granularity(granularity: ApiGranularity) -> engine::Granularity {
    match granularity {
        ApiGranularity::Day => engine::Granularity::Day,
        ApiGranularity::Week => engine::Granularity::Week,
        ApiGranularity::Month => engine::Granularity::Month,
    }
}

fn map_granularity_back(granularity: engine::Granularity) -> ApiGranularity {
    match granularity {
        engine::Granularity::Day => ApiGranularity::Day,
        engine::Granularity::Week => ApiGranularity::Week,
        engine::Granularity::Month => ApiGranularity::Month,
    }
}

pub async fn get_dashboard(
    State(state): State<ServerState>,
    Json(payload): Json<DashboardQuery>,
) -> Result<Json<DashboardResponse>, ServerError> {
    let dashboard = state
        .engine
        .dashboard(
            payload.from,
            payload.to,
            map_granularity(payload.granularity),
            payload.include_extra.unwrap_or(false),
            payload.anomaly_threshold,
        )
        .await?;

    Ok(Json(DashboardResponse {
        granularity: map_granularity_back(dashboard.granularity),
        buckets: dashboard
            .buckets
            .into_iter()
            .map(|bucket| BucketView {
                start: bucket.start,
                income_minor: bucket.income_minor,
                expense_minor: bucket.expense_minor,
                net_minor: bucket.net_minor,
            })
            .collect(),
        summary: SummaryView {
            buckets: dashboard.summary.buckets,
            mean_net: dashboard.summary.mean_net,
            std_dev_net: dashboard.summary.std_dev_net,
            stability_index: dashboard.summary.stability_index,
        },
        anomalies: dashboard
            .anomalies
            .into_iter()
            .map(|anomaly| AnomalyView {
                start: anomaly.start,
                net_minor: anomaly.net_minor,
                zscore: anomaly.zscore,
            })
            .collect(),
        forecast_net_minor: dashboard.forecast_net_minor,
    }))
}
