use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::CurrentSession,
        rbac::{self, Action},
    },
    models::{dashboard::StoreDetails, store::Store},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStorePayload {
    #[validate(length(min = 3, message = "O nome deve ter no mínimo 3 caracteres."))]
    #[schema(example = "Mercadinho da Esquina")]
    pub name: String,

    #[validate(url(message = "A imagem deve ser uma URL válida."))]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStorePayload {
    #[validate(length(min = 3, message = "O nome deve ter no mínimo 3 caracteres."))]
    pub name: Option<String>,

    #[validate(url(message = "A imagem deve ser uma URL válida."))]
    pub image: Option<String>,
}

// GET /api/store/details
#[utoipa::path(
    get,
    path = "/api/store/details",
    tag = "Store",
    responses(
        (status = 200, description = "Detalhes da loja atual", body = StoreDetails),
        (status = 404, description = "Loja não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_details(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, AppError> {
    let details = app_state
        .store_service
        .details(&app_state.db_pool, session)
        .await?;

    Ok((StatusCode::OK, Json(details)))
}

// POST /api/store
#[utoipa::path(
    post,
    path = "/api/store",
    tag = "Store",
    request_body = CreateStorePayload,
    responses(
        (status = 201, description = "Loja criada", body = Store),
        (status = 403, description = "Apenas OWNER pode criar lojas")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_store(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<CreateStorePayload>,
) -> Result<impl IntoResponse, AppError> {
    rbac::authorize(session.role, Action::ManageStore)?;
    payload.validate().map_err(AppError::ValidationError)?;

    let store = app_state
        .store_service
        .create(
            &app_state.db_pool,
            session,
            &payload.name,
            payload.image.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(store)))
}

// PUT /api/store
#[utoipa::path(
    put,
    path = "/api/store",
    tag = "Store",
    request_body = UpdateStorePayload,
    responses(
        (status = 200, description = "Loja atualizada", body = Store),
        (status = 403, description = "Apenas OWNER pode atualizar a loja")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_store(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<UpdateStorePayload>,
) -> Result<impl IntoResponse, AppError> {
    rbac::authorize(session.role, Action::ManageStore)?;
    payload.validate().map_err(AppError::ValidationError)?;

    let store = app_state
        .store_service
        .update(
            &app_state.db_pool,
            session,
            payload.name.as_deref(),
            payload.image.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(store)))
}

// DELETE /api/store
#[utoipa::path(
    delete,
    path = "/api/store",
    tag = "Store",
    responses(
        (status = 204, description = "Loja removida"),
        (status = 400, description = "Loja ainda tem vendas ou clientes"),
        (status = 403, description = "Apenas OWNER pode remover a loja")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_store(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, AppError> {
    rbac::authorize(session.role, Action::ManageStore)?;

    app_state
        .store_service
        .delete(&app_state.db_pool, session)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
