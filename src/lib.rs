// Core modules
pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod execution;
pub mod indicators;
pub mod ledger;
pub mod models;
pub mod portfolio;
pub mod strategy;

// Re-export commonly used types
pub use error::{BotError, Result};
pub use models::*;
pub use strategy::Strategy;
