// rowguard-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Domain (decision core)
// Schema, profiles, relation rules, cell checks.
// Depends on NOTHING else (no infra, no app).
pub mod domain;

// 2. Infrastructure (Adapters)
// Config loading (schema/profile files), dataset I/O.
// Depends on the Domain.
pub mod infrastructure;

// 3. Application (Use Cases)
// Validation pass, repair pass, orchestrator, reports.
// Depends on the Domain and the Infra.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// Lets callers import the essentials directly: use rowguard_core::Rowguard;
pub use application::engine::Rowguard;
pub use application::report::{RepairReport, ValidationReport};
pub use domain::profile::Profile;
pub use domain::schema::{ColumnSpec, Schema};
pub use domain::violation::{RepairAction, Violation};
pub use error::RowguardError;
