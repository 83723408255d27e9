pub mod error;
pub mod scope;
