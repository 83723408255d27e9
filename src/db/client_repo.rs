use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::client::Client};

#[derive(Clone, Default)]
pub struct ClientRepository;

impl ClientRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        name: &str,
        phone: &str,
        birth_date: NaiveDate,
        observations: Option<&str>,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (store_id, name, phone, birth_date, observations)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(name)
        .bind(phone)
        .bind(birth_date)
        .bind(observations)
        .fetch_one(executor)
        .await?;

        Ok(client)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(client)
    }

    // Busca por substring (case-insensitive) em nome/telefone, com paginação
    pub async fn list<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT * FROM clients
            WHERE store_id = $1
              AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%' OR phone ILIKE '%' || $2 || '%')
            ORDER BY name ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(store_id)
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(clients)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        birth_date: Option<NaiveDate>,
        observations: Option<&str>,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                birth_date = COALESCE($4, birth_date),
                observations = COALESCE($5, observations),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .bind(birth_date)
        .bind(observations)
        .fetch_one(executor)
        .await?;

        Ok(client)
    }

    pub async fn update_observations<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        observations: &str,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            "UPDATE clients SET observations = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(observations)
        .fetch_one(executor)
        .await?;

        Ok(client)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    // Ajuste incremental do saldo devedor. `delta` positivo aumenta a dívida
    // (venda criada) e negativo reduz (pagamento recebido).
    pub async fn adjust_debit_balance<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        delta: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE clients SET debit_balance = debit_balance + $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(delta)
        .execute(executor)
        .await?;

        Ok(())
    }
}
