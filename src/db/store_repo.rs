use chrono::{DateTime, Utc};
use sqlx::{Executor, FromRow, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::StoreRole,
        store::{MemberWithUser, Store},
    },
};

// Linha interna do JOIN store_members x stores (primeiro vínculo do login)
#[derive(Debug, FromRow)]
pub struct MembershipWithStore {
    pub role: StoreRole,
    pub store_id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MembershipWithStore {
    pub fn into_parts(self) -> (StoreRole, Store) {
        (
            self.role,
            Store {
                id: self.store_id,
                name: self.name,
                image: self.image,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        )
    }
}

#[derive(Clone, Default)]
pub struct StoreRepository;

impl StoreRepository {
    pub fn new() -> Self {
        Self
    }

    // =========================================================================
    //  LOJAS
    // =========================================================================

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        image: Option<&str>,
    ) -> Result<Store, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let store = sqlx::query_as::<_, Store>(
            "INSERT INTO stores (name, image) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(image)
        .fetch_one(executor)
        .await?;

        Ok(store)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Store>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let store = sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(store)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        image: Option<&str>,
    ) -> Result<Store, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let store = sqlx::query_as::<_, Store>(
            r#"
            UPDATE stores
            SET name = COALESCE($2, name),
                image = COALESCE($3, image),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(image)
        .fetch_one(executor)
        .await?;

        Ok(store)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn count_sales_and_clients<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
    ) -> Result<(i64, i64), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row: (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM sales WHERE store_id = $1),
                (SELECT COUNT(*) FROM clients WHERE store_id = $1)
            "#,
        )
        .bind(store_id)
        .fetch_one(executor)
        .await?;

        Ok(row)
    }

    // =========================================================================
    //  VÍNCULOS (user <-> store)
    // =========================================================================

    pub async fn add_member<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        store_id: Uuid,
        role: StoreRole,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("INSERT INTO store_members (user_id, store_id, role) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(store_id)
            .bind(role)
            .execute(executor)
            .await?;

        Ok(())
    }

    // Papel do usuário numa loja específica (None se não é membro)
    pub async fn find_member_role<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        store_id: Uuid,
    ) -> Result<Option<StoreRole>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let role = sqlx::query_scalar::<_, StoreRole>(
            "SELECT role FROM store_members WHERE user_id = $1 AND store_id = $2",
        )
        .bind(user_id)
        .bind(store_id)
        .fetch_optional(executor)
        .await?;

        Ok(role)
    }

    // O primeiro vínculo do usuário define a loja/papel do token no login
    pub async fn find_first_membership<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
    ) -> Result<Option<MembershipWithStore>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let membership = sqlx::query_as::<_, MembershipWithStore>(
            r#"
            SELECT m.role, s.id AS store_id, s.name, s.image, s.created_at, s.updated_at
            FROM store_members m
            JOIN stores s ON s.id = m.store_id
            WHERE m.user_id = $1
            ORDER BY m.created_at ASC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await?;

        Ok(membership)
    }

    pub async fn list_members<'e, E>(
        &self,
        executor: E,
        store_id: Uuid,
    ) -> Result<Vec<MemberWithUser>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let members = sqlx::query_as::<_, MemberWithUser>(
            r#"
            SELECT u.id, u.name, u.email, m.role
            FROM store_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.store_id = $1
            ORDER BY u.name ASC
            "#,
        )
        .bind(store_id)
        .fetch_all(executor)
        .await?;

        Ok(members)
    }

    pub async fn update_member_role<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        store_id: Uuid,
        role: StoreRole,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE store_members SET role = $3 WHERE user_id = $1 AND store_id = $2")
            .bind(user_id)
            .bind(store_id)
            .bind(role)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn delete_member<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        store_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM store_members WHERE user_id = $1 AND store_id = $2")
            .bind(user_id)
            .bind(store_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    // Quantos OWNERs a loja ainda tem (guarda do "último dono")
    pub async fn count_owners<'e, E>(&self, executor: E, store_id: Uuid) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM store_members WHERE store_id = $1 AND role = 'OWNER'",
        )
        .bind(store_id)
        .fetch_one(executor)
        .await?;

        Ok(count)
    }

    pub async fn count_user_memberships<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM store_members WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(executor)
                .await?;

        Ok(count)
    }
}
