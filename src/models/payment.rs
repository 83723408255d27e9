use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub value: Decimal,
    pub pay_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// Linha das listagens por cliente/loja: pagamento + resumo da venda
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentWithSale {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub value: Decimal,
    pub pay_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub sale_value: Decimal,
    pub is_paid: bool,
    pub client_name: String,
}
