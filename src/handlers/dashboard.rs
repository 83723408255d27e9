use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::CurrentSession,
    models::dashboard::StoreMetrics,
};

// Intervalo de datas opcional, inclusivo nas duas pontas
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// GET /api/store/metrics
#[utoipa::path(
    get,
    path = "/api/store/metrics",
    tag = "Store",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Métricas agregadas da loja", body = StoreMetrics)
    ),
    security(("api_jwt" = []))
)]
pub async fn store_metrics(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(period): Query<PeriodQuery>,
) -> Result<impl IntoResponse, AppError> {
    let metrics = app_state
        .dashboard_service
        .store_metrics(
            &app_state.db_pool,
            session,
            period.start_date,
            period.end_date,
        )
        .await?;

    Ok((StatusCode::OK, Json(metrics)))
}
