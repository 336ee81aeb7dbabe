// rowguard/src/commands/mod.rs

pub mod fit;
pub mod init_schema;
pub mod profiles;
pub mod repair;
pub mod validate;
