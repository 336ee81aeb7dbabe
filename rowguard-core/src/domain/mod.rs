pub mod column;
pub mod error;
pub mod profile;
pub mod relation;
pub mod schema;
pub mod value;
pub mod violation;

// Convenience re-exports to simplify imports elsewhere
pub use error::DomainError;
