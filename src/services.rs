pub mod auth;
pub use auth::AuthService;
pub mod client_service;
pub use client_service::ClientService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod ledger_service;
pub use ledger_service::LedgerService;
pub mod store_service;
pub use store_service::StoreService;
pub mod user_service;
pub use user_service::UserService;
