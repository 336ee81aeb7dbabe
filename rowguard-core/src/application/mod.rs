// rowguard-core/src/application/mod.rs

pub mod engine;
pub mod repair;
pub mod report;
pub mod validate;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI do:
// `use rowguard_core::application::{validate_dataset, repair_dataset, RepairContext};`
// without knowing the internal file layout.

pub use engine::Rowguard;
pub use repair::{RepairContext, repair_dataset};
pub use report::{RepairReport, ValidationReport};
pub use validate::{build_validation_report, validate_dataset};
