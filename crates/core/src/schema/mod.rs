//! Declarative record schemas.
//!
//! Each entity (product, variant, user) is described by a single static
//! list of [`FieldSpec`]s. That one list is consumed twice:
//!
//! - [`EntitySchema::describe`] renders it as a machine-readable
//!   [`SchemaDescription`] for the `/schema` endpoint, so external tools can
//!   build forms or validate documents without reading source code.
//! - [`EntitySchema::validate`] applies it to a raw JSON record, filling
//!   defaults and reporting every violated field.
//!
//! Because both operations read the same field list, the description and
//! the validator cannot drift apart.

pub mod entities;
pub mod fields;
pub mod validate;

pub use entities::{entity, entity_names, product, user, variant};
pub use fields::{EntitySchema, FieldDescription, FieldSpec, FieldType, SchemaDescription};
pub use validate::{FieldViolation, ValidationError};
