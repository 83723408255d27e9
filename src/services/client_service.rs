use chrono::NaiveDate;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, scope},
    db::{ClientRepository, DashboardRepository},
    models::{
        auth::Session,
        client::Client,
        dashboard::{ClientMetrics, Period},
    },
};

#[derive(Clone)]
pub struct ClientService {
    client_repo: ClientRepository,
    dashboard_repo: DashboardRepository,
}

impl ClientService {
    pub fn new(client_repo: ClientRepository, dashboard_repo: DashboardRepository) -> Self {
        Self {
            client_repo,
            dashboard_repo,
        }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        session: Session,
        name: &str,
        phone: &str,
        birth_date: NaiveDate,
        observations: Option<&str>,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.client_repo
            .create(executor, session.store_id, name, phone, birth_date, observations)
            .await
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        session: Session,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.client_repo
            .list(executor, session.store_id, search, limit, offset)
            .await
    }

    pub async fn get<'e, E>(
        &self,
        executor: E,
        session: Session,
        id: Uuid,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        scope::find_scoped(
            self.client_repo.find_by_id(executor, id).await?,
            session.store_id,
            "Cliente",
            |c| c.store_id,
        )
    }

    pub async fn update<'e, A>(
        &self,
        executor: A,
        session: Session,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        birth_date: Option<NaiveDate>,
        observations: Option<&str>,
    ) -> Result<Client, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        scope::find_scoped(
            self.client_repo.find_by_id(&mut *conn, id).await?,
            session.store_id,
            "Cliente",
            |c| c.store_id,
        )?;

        self.client_repo
            .update(&mut *conn, id, name, phone, birth_date, observations)
            .await
    }

    pub async fn update_observations<'e, A>(
        &self,
        executor: A,
        session: Session,
        id: Uuid,
        observations: &str,
    ) -> Result<Client, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        scope::find_scoped(
            self.client_repo.find_by_id(&mut *conn, id).await?,
            session.store_id,
            "Cliente",
            |c| c.store_id,
        )?;

        self.client_repo
            .update_observations(&mut *conn, id, observations)
            .await
    }

    pub async fn delete<'e, A>(
        &self,
        executor: A,
        session: Session,
        id: Uuid,
    ) -> Result<(), AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        scope::find_scoped(
            self.client_repo.find_by_id(&mut *conn, id).await?,
            session.store_id,
            "Cliente",
            |c| c.store_id,
        )?;

        // Vendas e pagamentos do cliente caem junto por cascata
        self.client_repo.delete(&mut *conn, id).await
    }

    // Visão consolidada do cliente no período: total pago, saldo atual
    // e cada venda com o respectivo total recebido.
    pub async fn metrics<'e, A>(
        &self,
        executor: A,
        session: Session,
        id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<ClientMetrics, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        let client = scope::find_scoped(
            self.client_repo.find_by_id(&mut *conn, id).await?,
            session.store_id,
            "Cliente",
            |c| c.store_id,
        )?;

        let total_payments = self
            .dashboard_repo
            .client_payments_total(&mut *conn, session.store_id, id, start_date, end_date)
            .await?;

        let sales = self
            .dashboard_repo
            .client_sales_summary(&mut *conn, session.store_id, id, start_date, end_date)
            .await?;

        Ok(ClientMetrics {
            client_name: client.name,
            debit_balance: client.debit_balance,
            total_payments,
            sales,
            period: Period {
                start_date,
                end_date,
            },
        })
    }
}
