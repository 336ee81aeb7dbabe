// rowguard-core/src/infrastructure/config/mod.rs

pub mod profile;
pub mod schema;

pub use profile::resolve_profile;
pub use schema::{load_schema, save_schema, starter_schema};
