//! Technician views

pub mod service;

pub use service::TechnicianService;
