use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sale::{Sale, SaleWithTotals},
};

// Filtros da listagem de vendas (tudo opcional, combinável)
#[derive(Debug, Default)]
pub struct SaleFilters<'a> {
    pub search: Option<&'a str>,
    pub is_paid: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Clone, Default)]
pub struct SaleRepository;

impl SaleRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        client_id: Uuid,
        user_id: Uuid,
        value: Decimal,
        description: &str,
        is_paid: bool,
        due_date: DateTime<Utc>,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (store_id, client_id, user_id, value, description, is_paid, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(client_id)
        .bind(user_id)
        .bind(value)
        .bind(description)
        .bind(is_paid)
        .bind(due_date)
        .fetch_one(executor)
        .await?;

        Ok(sale)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Sale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(sale)
    }

    pub async fn find_with_totals<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<SaleWithTotals>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, SaleWithTotals>(
            r#"
            SELECT s.id, s.store_id, s.client_id, s.user_id, s.value, s.description,
                   s.is_paid, s.sale_date, s.due_date, s.created_at,
                   c.name AS client_name,
                   COALESCE(SUM(p.value), 0) AS total_paid
            FROM sales s
            JOIN clients c ON c.id = s.client_id
            LEFT JOIN payments p ON p.sale_id = s.id
            WHERE s.id = $1
            GROUP BY s.id, c.name
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(sale)
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        filters: &SaleFilters<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SaleWithTotals>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // O intervalo de datas é inclusivo nas duas pontas
        let sales = sqlx::query_as::<_, SaleWithTotals>(
            r#"
            SELECT s.id, s.store_id, s.client_id, s.user_id, s.value, s.description,
                   s.is_paid, s.sale_date, s.due_date, s.created_at,
                   c.name AS client_name,
                   COALESCE(SUM(p.value), 0) AS total_paid
            FROM sales s
            JOIN clients c ON c.id = s.client_id
            LEFT JOIN payments p ON p.sale_id = s.id
            WHERE s.store_id = $1
              AND ($2::text IS NULL
                   OR s.description ILIKE '%' || $2 || '%'
                   OR c.name ILIKE '%' || $2 || '%')
              AND ($3::boolean IS NULL OR s.is_paid = $3)
              AND ($4::date IS NULL OR s.sale_date::date >= $4)
              AND ($5::date IS NULL OR s.sale_date::date <= $5)
            GROUP BY s.id, c.name
            ORDER BY s.created_at DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(store_id)
        .bind(filters.search)
        .bind(filters.is_paid)
        .bind(filters.start_date)
        .bind(filters.end_date)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(sales)
    }

    pub async fn list_by_client<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        client_id: Uuid,
    ) -> Result<Vec<SaleWithTotals>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sales = sqlx::query_as::<_, SaleWithTotals>(
            r#"
            SELECT s.id, s.store_id, s.client_id, s.user_id, s.value, s.description,
                   s.is_paid, s.sale_date, s.due_date, s.created_at,
                   c.name AS client_name,
                   COALESCE(SUM(p.value), 0) AS total_paid
            FROM sales s
            JOIN clients c ON c.id = s.client_id
            LEFT JOIN payments p ON p.sale_id = s.id
            WHERE s.store_id = $1 AND s.client_id = $2
            GROUP BY s.id, c.name
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(store_id)
        .bind(client_id)
        .fetch_all(executor)
        .await?;

        Ok(sales)
    }

    // Atualização parcial. Edição de value/is_paid por aqui NÃO reconcilia
    // o saldo devedor do cliente.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        value: Option<Decimal>,
        description: Option<&str>,
        is_paid: Option<bool>,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales
            SET value = COALESCE($2, value),
                description = COALESCE($3, description),
                is_paid = COALESCE($4, is_paid),
                due_date = COALESCE($5, due_date)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(value)
        .bind(description)
        .bind(is_paid)
        .bind(due_date)
        .fetch_one(executor)
        .await?;

        Ok(sale)
    }

    pub async fn set_paid<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        is_paid: bool,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE sales SET is_paid = $2 WHERE id = $1")
            .bind(id)
            .bind(is_paid)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }
}
