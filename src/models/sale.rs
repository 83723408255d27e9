use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub store_id: Uuid,
    pub client_id: Uuid,
    // O funcionário que registrou a venda (None se ele já saiu da loja)
    pub user_id: Option<Uuid>,
    pub value: Decimal,
    pub description: String,
    pub is_paid: bool,
    pub sale_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// Linha das listagens: venda + nome do cliente + total já pago
// (agregado em SQL, sem carregar os pagamentos um a um).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleWithTotals {
    pub id: Uuid,
    pub store_id: Uuid,
    pub client_id: Uuid,
    pub user_id: Option<Uuid>,
    pub value: Decimal,
    pub description: String,
    pub is_paid: bool,
    pub sale_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub client_name: String,
    pub total_paid: Decimal,
}
