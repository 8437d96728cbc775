//! Shared types, errors, and configuration for Immobook.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for buildings, units and the recurring source records
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ScheduleConfig};
pub use error::AppError;
