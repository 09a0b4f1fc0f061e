//! Core domain types and logic.

pub mod period;
pub mod ratios;
pub mod compliance;
pub mod rate;
pub mod tracker;
pub mod summary;
pub mod config_validation;
pub mod error;
