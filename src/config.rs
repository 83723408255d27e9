// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ClientRepository, DashboardRepository, PaymentRepository, SaleRepository, StoreRepository,
        UserRepository,
    },
    services::{
        AuthService, ClientService, DashboardService, LedgerService, StoreService, UserService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub ledger_service: LedgerService,
    pub client_service: ClientService,
    pub store_service: StoreService,
    pub user_service: UserService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new();
        let store_repo = StoreRepository::new();
        let client_repo = ClientRepository::new();
        let sale_repo = SaleRepository::new();
        let payment_repo = PaymentRepository::new();
        let dashboard_repo = DashboardRepository::new();

        let auth_service = AuthService::new(
            user_repo.clone(),
            store_repo.clone(),
            jwt_secret,
            db_pool.clone(),
        );
        let ledger_service =
            LedgerService::new(sale_repo, payment_repo, client_repo.clone());
        let client_service = ClientService::new(client_repo, dashboard_repo.clone());
        let store_service = StoreService::new(store_repo.clone(), dashboard_repo.clone());
        let user_service = UserService::new(user_repo, store_repo);
        let dashboard_service = DashboardService::new(dashboard_repo);

        Ok(Self {
            db_pool,
            auth_service,
            ledger_service,
            client_service,
            store_service,
            user_service,
            dashboard_service,
        })
    }
}
