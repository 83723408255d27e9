use chrono::{NaiveDate, Utc};
use sqlx::{Acquire, Postgres};

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::{auth::Session, dashboard::StoreMetrics},
};

// Quantas vendas entram no ranking do painel
const TOP_SALES_LIMIT: i64 = 5;

#[derive(Clone)]
pub struct DashboardService {
    dashboard_repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(dashboard_repo: DashboardRepository) -> Self {
        Self { dashboard_repo }
    }

    pub async fn store_metrics<'e, A>(
        &self,
        executor: A,
        session: Session,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<StoreMetrics, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;
        let store_id = session.store_id;

        let total_debits = self.dashboard_repo.total_debits(&mut *conn, store_id).await?;

        let clients_in_debt = self
            .dashboard_repo
            .clients_in_debt(&mut *conn, store_id)
            .await?;

        // Pagamentos registrados + vendas quitadas na criação (sem linha
        // de pagamento) compõem o total recebido no período
        let payments = self
            .dashboard_repo
            .payments_total(&mut *conn, store_id, start_date, end_date)
            .await?;

        let settled_sales = self
            .dashboard_repo
            .settled_sales_total(&mut *conn, store_id, start_date, end_date)
            .await?;

        let top_sales = self
            .dashboard_repo
            .top_sales(&mut *conn, store_id, start_date, end_date, TOP_SALES_LIMIT)
            .await?;

        Ok(StoreMetrics {
            total_debits,
            total_payments: payments + settled_sales,
            clients_in_debt,
            top_sales,
            updated_at: Utc::now(),
        })
    }
}
