//! # vin-core
//!
//! Core types for the Vinventory client.
//!
//! - Entity DTOs mirrored from the API (components, types, users, history)
//! - Domain enums with their verbatim wire strings
//! - Component listing filters and their query encoding
//! - Client-side validation (required fields per type, positive numeric specs)
//! - Auxiliary response payloads

pub mod entities;
pub mod enums;
pub mod filter;
pub mod responses;
pub mod validation;

pub use enums::ParseEnumError;
pub use validation::ValidationError;
