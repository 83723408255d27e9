use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::CurrentSession,
        rbac::{self, Action},
    },
    models::payment::{Payment, PaymentWithSale},
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentPayload {
    #[schema(value_type = f64, example = 60.0)]
    pub value: Decimal,
    pub sale_id: Uuid,
}

// POST /api/payments
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "Payments",
    request_body = CreatePaymentPayload,
    responses(
        (status = 201, description = "Pagamento registrado", body = Payment),
        (status = 400, description = "Venda já paga ou valor acima do restante"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_payment(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<CreatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    rbac::authorize(session.role, Action::CreatePayment)?;

    let payment = app_state
        .ledger_service
        .create_payment(&app_state.db_pool, session, payload.sale_id, payload.value)
        .await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

// DELETE /api/payments/{id}
#[utoipa::path(
    delete,
    path = "/api/payments/{id}",
    tag = "Payments",
    params(("id" = Uuid, Path, description = "ID do pagamento")),
    responses(
        (status = 204, description = "Pagamento removido e venda reaberta"),
        (status = 403, description = "Permissão insuficiente"),
        (status = 404, description = "Pagamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_payment(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    rbac::authorize(session.role, Action::DeletePayment)?;

    app_state
        .ledger_service
        .delete_payment(&app_state.db_pool, session, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/payments
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "Payments",
    responses(
        (status = 200, description = "Pagamentos da loja", body = Vec<PaymentWithSale>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_payments(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, AppError> {
    let payments = app_state
        .ledger_service
        .list_payments(&app_state.db_pool, session)
        .await?;

    Ok((StatusCode::OK, Json(payments)))
}

// GET /api/payments/sale/{saleId}
#[utoipa::path(
    get,
    path = "/api/payments/sale/{saleId}",
    tag = "Payments",
    params(("saleId" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Pagamentos da venda", body = Vec<Payment>),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_payments_by_sale(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(sale_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payments = app_state
        .ledger_service
        .list_payments_by_sale(&app_state.db_pool, session, sale_id)
        .await?;

    Ok((StatusCode::OK, Json(payments)))
}

// GET /api/payments/client/{clientId}
#[utoipa::path(
    get,
    path = "/api/payments/client/{clientId}",
    tag = "Payments",
    params(("clientId" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Pagamentos do cliente", body = Vec<PaymentWithSale>),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_payments_by_client(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payments = app_state
        .ledger_service
        .list_payments_by_client(&app_state.db_pool, session, client_id)
        .await?;

    Ok((StatusCode::OK, Json(payments)))
}
