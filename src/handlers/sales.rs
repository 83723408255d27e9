use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::sale_repo::SaleFilters,
    middleware::{
        auth::CurrentSession,
        rbac::{self, Action},
    },
    models::sale::{Sale, SaleWithTotals},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    #[schema(value_type = f64, example = 100.0)]
    pub value: Decimal,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "2kg de carne e 1 fardo de cerveja")]
    pub description: String,

    // Venda que já nasce quitada não mexe no saldo devedor
    #[serde(default)]
    pub is_paid: bool,

    pub due_date: DateTime<Utc>,
    pub client_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalePayload {
    #[schema(value_type = Option<f64>)]
    pub value: Option<Decimal>,
    #[validate(length(min = 1, message = "required"))]
    pub description: Option<String>,
    pub is_paid: Option<bool>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListSalesQuery {
    // Busca por substring na descrição ou no nome do cliente
    pub search: Option<String>,
    pub is_paid: Option<bool>,
    // Intervalo inclusivo sobre a data da venda
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda registrada", body = Sale),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    rbac::authorize(session.role, Action::CreateSale)?;
    payload.validate().map_err(AppError::ValidationError)?;

    let sale = app_state
        .ledger_service
        .create_sale(
            &app_state.db_pool,
            session,
            payload.client_id,
            payload.value,
            &payload.description,
            payload.is_paid,
            payload.due_date,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    params(ListSalesQuery),
    responses(
        (status = 200, description = "Vendas da loja", body = Vec<SaleWithTotals>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<ListSalesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (per_page, offset) = super::page_window(query.page, query.per_page);

    let filters = SaleFilters {
        search: query.search.as_deref(),
        is_paid: query.is_paid,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    let sales = app_state
        .ledger_service
        .list_sales(&app_state.db_pool, session, &filters, per_page, offset)
        .await?;

    Ok((StatusCode::OK, Json(sales)))
}

// GET /api/sales/{id}
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda com totais", body = SaleWithTotals),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state
        .ledger_service
        .get_sale(&app_state.db_pool, session, id)
        .await?;

    Ok((StatusCode::OK, Json(sale)))
}

// GET /api/sales/client/{clientId}
#[utoipa::path(
    get,
    path = "/api/sales/client/{clientId}",
    tag = "Sales",
    params(("clientId" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Vendas do cliente", body = Vec<SaleWithTotals>),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_sales_by_client(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sales = app_state
        .ledger_service
        .list_sales_by_client(&app_state.db_pool, session, client_id)
        .await?;

    Ok((StatusCode::OK, Json(sales)))
}

// PUT /api/sales/{id}
#[utoipa::path(
    put,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    request_body = UpdateSalePayload,
    responses(
        (status = 200, description = "Venda atualizada", body = Sale),
        (status = 403, description = "Permissão insuficiente"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_sale(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    rbac::authorize(session.role, Action::UpdateSale)?;
    payload.validate().map_err(AppError::ValidationError)?;

    let sale = app_state
        .ledger_service
        .update_sale(
            &app_state.db_pool,
            session,
            id,
            payload.value,
            payload.description.as_deref(),
            payload.is_paid,
            payload.due_date,
        )
        .await?;

    Ok((StatusCode::OK, Json(sale)))
}

// DELETE /api/sales/{id}
#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 204, description = "Venda removida"),
        (status = 403, description = "Permissão insuficiente"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_sale(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    rbac::authorize(session.role, Action::DeleteSale)?;

    app_state
        .ledger_service
        .delete_sale(&app_state.db_pool, session, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
