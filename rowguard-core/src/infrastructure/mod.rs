// rowguard-core/src/infrastructure/mod.rs

pub mod config;
pub mod dataset;
pub mod error;
