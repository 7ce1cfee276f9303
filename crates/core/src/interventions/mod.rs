//! Maintenance tickets

pub mod ports;
pub mod service;

pub use service::InterventionService;
