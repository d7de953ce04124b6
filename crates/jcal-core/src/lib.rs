//! Shared building blocks for the jCal workspace: errors, the process-wide
//! numeric policy and configuration loading.

pub mod config;
pub mod error;
pub mod policy;
