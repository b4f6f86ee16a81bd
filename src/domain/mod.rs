//! Core domain types and logic.

pub mod commodity;
pub mod generator;
pub mod table;
pub mod statistics;
pub mod trend;
pub mod correlation;
pub mod distribution;
pub mod insights;
pub mod config_validation;
pub mod error;
