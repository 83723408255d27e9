use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::dashboard::PeriodQuery,
    middleware::{
        auth::CurrentSession,
        rbac::{self, Action},
    },
    models::{client::Client, dashboard::ClientMetrics},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(length(min = 3, message = "O nome deve ter no mínimo 3 caracteres."))]
    #[schema(example = "João Pereira")]
    pub name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "11999990000")]
    pub phone: String,

    #[schema(value_type = String, format = Date, example = "1985-03-10")]
    pub birth_date: NaiveDate,

    pub observations: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientPayload {
    #[validate(length(min = 3, message = "O nome deve ter no mínimo 3 caracteres."))]
    pub name: Option<String>,
    pub phone: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,
    pub observations: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateObservationsPayload {
    pub observations: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListClientsQuery {
    // Busca por substring em nome ou telefone, sem diferenciar maiúsculas
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clients",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Client),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    // Autorização vem antes da validação do corpo
    rbac::authorize(session.role, Action::CreateClient)?;
    payload.validate().map_err(AppError::ValidationError)?;

    let client = app_state
        .client_service
        .create(
            &app_state.db_pool,
            session,
            &payload.name,
            &payload.phone,
            payload.birth_date,
            payload.observations.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(client)))
}

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    params(ListClientsQuery),
    responses(
        (status = 200, description = "Lista de clientes da loja", body = Vec<Client>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<ListClientsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (per_page, offset) = super::page_window(query.page, query.per_page);

    let clients = app_state
        .client_service
        .list(
            &app_state.db_pool,
            session,
            query.search.as_deref(),
            per_page,
            offset,
        )
        .await?;

    Ok((StatusCode::OK, Json(clients)))
}

// GET /api/clients/{id}
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Client),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state
        .client_service
        .get(&app_state.db_pool, session, id)
        .await?;

    Ok((StatusCode::OK, Json(client)))
}

// PUT /api/clients/{id}
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = UpdateClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Client),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    rbac::authorize(session.role, Action::UpdateClient)?;
    payload.validate().map_err(AppError::ValidationError)?;

    let client = app_state
        .client_service
        .update(
            &app_state.db_pool,
            session,
            id,
            payload.name.as_deref(),
            payload.phone.as_deref(),
            payload.birth_date,
            payload.observations.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(client)))
}

// PATCH /api/clients/{id}/observations
#[utoipa::path(
    patch,
    path = "/api/clients/{id}/observations",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = UpdateObservationsPayload,
    responses(
        (status = 200, description = "Observações atualizadas", body = Client),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_observations(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateObservationsPayload>,
) -> Result<impl IntoResponse, AppError> {
    rbac::authorize(session.role, Action::UpdateClientObservations)?;

    let client = app_state
        .client_service
        .update_observations(&app_state.db_pool, session, id, &payload.observations)
        .await?;

    Ok((StatusCode::OK, Json(client)))
}

// DELETE /api/clients/{id}
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 403, description = "Permissão insuficiente"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    rbac::authorize(session.role, Action::DeleteClient)?;

    app_state
        .client_service
        .delete(&app_state.db_pool, session, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/clients/{id}/metrics
#[utoipa::path(
    get,
    path = "/api/clients/{id}/metrics",
    tag = "Clients",
    params(
        ("id" = Uuid, Path, description = "ID do cliente"),
        PeriodQuery
    ),
    responses(
        (status = 200, description = "Métricas do cliente no período", body = ClientMetrics),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn client_metrics(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Query(period): Query<PeriodQuery>,
) -> Result<impl IntoResponse, AppError> {
    let metrics = app_state
        .client_service
        .metrics(
            &app_state.db_pool,
            session,
            id,
            period.start_date,
            period.end_date,
        )
        .await?;

    Ok((StatusCode::OK, Json(metrics)))
}
