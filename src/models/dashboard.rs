use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Todos os números daqui são deriváveis de vendas, pagamentos e saldos;
// servem de contraprova do motor de lançamentos.

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreDetails {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub total_clients: i64,
    pub total_sales: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopSaleEntry {
    pub id: Uuid,
    pub value: Decimal,
    pub description: String,
    pub sale_date: DateTime<Utc>,
    pub is_paid: bool,
    pub client_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreMetrics {
    // Soma dos saldos devedores positivos
    pub total_debits: Decimal,
    // Pagamentos no período + vendas quitadas na criação (que não geram linha de pagamento)
    pub total_payments: Decimal,
    pub clients_in_debt: i64,
    pub top_sales: Vec<TopSaleEntry>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientSaleSummary {
    pub id: Uuid,
    pub value: Decimal,
    pub description: String,
    pub sale_date: DateTime<Utc>,
    pub is_paid: bool,
    pub total_paid: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientMetrics {
    pub client_name: String,
    pub debit_balance: Decimal,
    pub total_payments: Decimal,
    pub sales: Vec<ClientSaleSummary>,
    pub period: Period,
}
