//! Middleware components for the HTTP facade

pub mod cors;
pub mod logging;
