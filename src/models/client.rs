use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Cliente da caderneta. `debit_balance` é o saldo devedor acumulado,
// mantido incrementalmente pelo motor de lançamentos a cada venda/pagamento.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub observations: Option<String>,
    pub debit_balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
