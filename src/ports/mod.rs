//! Port traits the domain pipeline talks to.

pub mod chart_port;
pub mod config_port;
pub mod export_port;
pub mod random_port;
