//! Vitrine Core - Shared types and record schemas.
//!
//! This crate provides the types shared across Vitrine components:
//! - `server` - The catalog HTTP API
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers such as the opaque [`DocumentId`]
//! - [`schema`] - Declarative record schemas: one static field list per
//!   entity drives both validation and the `/schema` description
//! - [`models`] - Typed entity structs kept in lock-step with the schemas

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod schema;
pub mod types;

pub use models::{Product, User, Variant};
pub use schema::{
    EntitySchema, FieldDescription, FieldSpec, FieldType, FieldViolation, SchemaDescription,
    ValidationError, entity, entity_names, product, user, variant,
};
pub use types::*;
