pub mod auth;
pub mod client;
pub mod dashboard;
pub mod payment;
pub mod sale;
pub mod store;
