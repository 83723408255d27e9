use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, FromRow, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::payment::{Payment, PaymentWithSale},
};

// Linha interna: pagamento + dados de posse da venda, usada no delete
// para checar o escopo da loja e devolver o valor ao saldo do cliente.
#[derive(Debug, FromRow)]
pub struct PaymentOwnership {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub value: Decimal,
    pub pay_date: DateTime<Utc>,
    pub store_id: Uuid,
    pub client_id: Uuid,
}

#[derive(Clone, Default)]
pub struct PaymentRepository;

impl PaymentRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
        value: Decimal,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (sale_id, value) VALUES ($1, $2) RETURNING *",
        )
        .bind(sale_id)
        .bind(value)
        .fetch_one(executor)
        .await?;

        Ok(payment)
    }

    // Total já pago de uma venda (zero quando não há pagamentos)
    pub async fn total_paid<'e, E>(&self, executor: E, sale_id: Uuid) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(value), 0) FROM payments WHERE sale_id = $1",
        )
        .bind(sale_id)
        .fetch_one(executor)
        .await?;

        Ok(total)
    }

    pub async fn find_ownership<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<PaymentOwnership>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, PaymentOwnership>(
            r#"
            SELECT p.id, p.sale_id, p.value, p.pay_date, s.store_id, s.client_id
            FROM payments p
            JOIN sales s ON s.id = p.sale_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(payment)
    }

    pub async fn list_by_sale<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
    ) -> Result<Vec<Payment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE sale_id = $1 ORDER BY pay_date DESC",
        )
        .bind(sale_id)
        .fetch_all(executor)
        .await?;

        Ok(payments)
    }

    pub async fn list_by_client<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        client_id: Uuid,
    ) -> Result<Vec<PaymentWithSale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payments = sqlx::query_as::<_, PaymentWithSale>(
            r#"
            SELECT p.id, p.sale_id, p.value, p.pay_date, p.created_at,
                   s.description, s.value AS sale_value, s.is_paid,
                   c.name AS client_name
            FROM payments p
            JOIN sales s ON s.id = p.sale_id
            JOIN clients c ON c.id = s.client_id
            WHERE s.store_id = $1 AND s.client_id = $2
            ORDER BY p.pay_date DESC
            "#,
        )
        .bind(store_id)
        .bind(client_id)
        .fetch_all(executor)
        .await?;

        Ok(payments)
    }

    pub async fn list_by_store<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
    ) -> Result<Vec<PaymentWithSale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payments = sqlx::query_as::<_, PaymentWithSale>(
            r#"
            SELECT p.id, p.sale_id, p.value, p.pay_date, p.created_at,
                   s.description, s.value AS sale_value, s.is_paid,
                   c.name AS client_name
            FROM payments p
            JOIN sales s ON s.id = p.sale_id
            JOIN clients c ON c.id = s.client_id
            WHERE s.store_id = $1
            ORDER BY p.pay_date DESC
            "#,
        )
        .bind(store_id)
        .fetch_all(executor)
        .await?;

        Ok(payments)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }
}
