//! on-call agent REST API contract types and validation
//!
//! This crate defines the schema types exchanged with the investigation
//! backend, request validation, and the tolerant decoder for diagnostic
//! payloads. These types are shared between the REST client, the mock
//! client, and the core lifecycle logic.

pub mod diagnostic;
pub mod error;
pub mod types;
pub mod validation;

pub use diagnostic::*;
pub use error::*;
pub use types::*;
