mod gate_service;

pub mod app;
pub mod config;

pub use app::start_app;
pub use gate_service::{check_confidence, gate, GateError, THRESHOLD, THRESHOLD_NOT_MET};
