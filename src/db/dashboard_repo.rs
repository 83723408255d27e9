use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::dashboard::{ClientSaleSummary, StoreDetails, TopSaleEntry},
};

// Consultas somente-leitura dos painéis. Nenhuma mutação acontece aqui.
#[derive(Clone, Default)]
pub struct DashboardRepository;

impl DashboardRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn store_details<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
    ) -> Result<Option<StoreDetails>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let details = sqlx::query_as::<_, StoreDetails>(
            r#"
            SELECT s.id, s.name, s.image,
                   (SELECT COUNT(*) FROM clients WHERE store_id = s.id) AS total_clients,
                   (SELECT COUNT(*) FROM sales WHERE store_id = s.id) AS total_sales,
                   s.created_at, s.updated_at
            FROM stores s
            WHERE s.id = $1
            "#,
        )
        .bind(store_id)
        .fetch_optional(executor)
        .await?;

        Ok(details)
    }

    // Soma dos saldos devedores positivos da loja
    pub async fn total_debits<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(debit_balance) FILTER (WHERE debit_balance > 0), 0)
            FROM clients
            WHERE store_id = $1
            "#,
        )
        .bind(store_id)
        .fetch_one(executor)
        .await?;

        Ok(total)
    }

    pub async fn clients_in_debt<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM clients WHERE store_id = $1 AND debit_balance > 0",
        )
        .bind(store_id)
        .fetch_one(executor)
        .await?;

        Ok(count)
    }

    // Total de pagamentos da loja no período (pela data da venda)
    pub async fn payments_total<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(p.value), 0)
            FROM payments p
            JOIN sales s ON s.id = p.sale_id
            WHERE s.store_id = $1
              AND ($2::date IS NULL OR s.sale_date::date >= $2)
              AND ($3::date IS NULL OR s.sale_date::date <= $3)
            "#,
        )
        .bind(store_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(executor)
        .await?;

        Ok(total)
    }

    // Vendas quitadas na criação não geram linha de pagamento;
    // o valor delas entra no total recebido por esta soma separada.
    pub async fn settled_sales_total<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(s.value), 0)
            FROM sales s
            WHERE s.store_id = $1
              AND s.is_paid = TRUE
              AND NOT EXISTS (SELECT 1 FROM payments p WHERE p.sale_id = s.id)
              AND ($2::date IS NULL OR s.sale_date::date >= $2)
              AND ($3::date IS NULL OR s.sale_date::date <= $3)
            "#,
        )
        .bind(store_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(executor)
        .await?;

        Ok(total)
    }

    pub async fn top_sales<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        limit: i64,
    ) -> Result<Vec<TopSaleEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sales = sqlx::query_as::<_, TopSaleEntry>(
            r#"
            SELECT s.id, s.value, s.description, s.sale_date, s.is_paid,
                   c.name AS client_name
            FROM sales s
            JOIN clients c ON c.id = s.client_id
            WHERE s.store_id = $1
              AND ($2::date IS NULL OR s.sale_date::date >= $2)
              AND ($3::date IS NULL OR s.sale_date::date <= $3)
            ORDER BY s.value DESC
            LIMIT $4
            "#,
        )
        .bind(store_id)
        .bind(start_date)
        .bind(end_date)
        .bind(limit)
        .fetch_all(executor)
        .await?;

        Ok(sales)
    }

    // Total pago nas vendas de um cliente no período
    pub async fn client_payments_total<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        client_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(p.value), 0)
            FROM payments p
            JOIN sales s ON s.id = p.sale_id
            WHERE s.store_id = $1
              AND s.client_id = $2
              AND ($3::date IS NULL OR s.sale_date::date >= $3)
              AND ($4::date IS NULL OR s.sale_date::date <= $4)
            "#,
        )
        .bind(store_id)
        .bind(client_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(executor)
        .await?;

        Ok(total)
    }

    pub async fn client_sales_summary<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        client_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<ClientSaleSummary>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sales = sqlx::query_as::<_, ClientSaleSummary>(
            r#"
            SELECT s.id, s.value, s.description, s.sale_date, s.is_paid,
                   COALESCE(SUM(p.value), 0) AS total_paid
            FROM sales s
            LEFT JOIN payments p ON p.sale_id = s.id
            WHERE s.store_id = $1
              AND s.client_id = $2
              AND ($3::date IS NULL OR s.sale_date::date >= $3)
              AND ($4::date IS NULL OR s.sale_date::date <= $4)
            GROUP BY s.id
            ORDER BY s.sale_date DESC
            "#,
        )
        .bind(store_id)
        .bind(client_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(executor)
        .await?;

        Ok(sales)
    }
}
