pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod payment_repo;
pub use payment_repo::PaymentRepository;
pub mod sale_repo;
pub use sale_repo::SaleRepository;
pub mod store_repo;
pub use store_repo::StoreRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
