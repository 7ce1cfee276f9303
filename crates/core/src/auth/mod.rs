//! Accounts and hotels

pub mod ports;
pub mod service;

pub use service::AuthService;
