use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    db::{DashboardRepository, StoreRepository},
    models::{
        auth::{Session, StoreRole},
        dashboard::StoreDetails,
        store::Store,
    },
};

#[derive(Clone)]
pub struct StoreService {
    store_repo: StoreRepository,
    dashboard_repo: DashboardRepository,
}

impl StoreService {
    pub fn new(store_repo: StoreRepository, dashboard_repo: DashboardRepository) -> Self {
        Self {
            store_repo,
            dashboard_repo,
        }
    }

    // Cria a loja e já vincula quem criou como OWNER dela
    pub async fn create<'e, E>(
        &self,
        executor: E,
        session: Session,
        name: &str,
        image: Option<&str>,
    ) -> Result<Store, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let store = self.store_repo.create(&mut *tx, name, image).await?;

        self.store_repo
            .add_member(&mut *tx, session.user_id, store.id, StoreRole::Owner)
            .await?;

        tx.commit().await?;
        Ok(store)
    }

    pub async fn update<'e, A>(
        &self,
        executor: A,
        session: Session,
        name: Option<&str>,
        image: Option<&str>,
    ) -> Result<Store, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        if name.is_none() && image.is_none() {
            return Err(AppError::InvalidInput(
                "Nenhum dado fornecido para atualização".into(),
            ));
        }

        let mut conn = executor.acquire().await?;

        self.store_repo
            .find_by_id(&mut *conn, session.store_id)
            .await?
            .ok_or(AppError::NotFound("Loja"))?;

        self.store_repo
            .update(&mut *conn, session.store_id, name, image)
            .await
    }

    // A loja só pode ser removida quando não sobrou movimento nenhum
    pub async fn delete<'e, A>(&self, executor: A, session: Session) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        let (sales_count, clients_count) = self
            .store_repo
            .count_sales_and_clients(&mut *conn, session.store_id)
            .await?;

        if sales_count > 0 || clients_count > 0 {
            return Err(AppError::InvalidState(
                "Não é possível excluir uma loja com vendas ou clientes cadastrados".into(),
            ));
        }

        // Os vínculos caem por cascata
        self.store_repo.delete(&mut *conn, session.store_id).await
    }

    pub async fn details<'e, E>(
        &self,
        executor: E,
        session: Session,
    ) -> Result<StoreDetails, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.dashboard_repo
            .store_details(executor, session.store_id)
            .await?
            .ok_or(AppError::NotFound("Loja"))
    }
}
