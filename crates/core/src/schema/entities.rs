//! The catalog entity schemas.
//!
//! One static [`EntitySchema`] per entity, looked up by name. Field lists,
//! constraints, defaults and hints here are the canonical definition of the
//! catalog's record shapes; the typed structs in [`crate::models`] mirror
//! them and are checked against them in tests.

use std::sync::LazyLock;

use serde_json::json;

use super::fields::{EntitySchema, FieldSpec};

static PRODUCT: LazyLock<EntitySchema> = LazyLock::new(product_schema);
static VARIANT: LazyLock<EntitySchema> = LazyLock::new(variant_schema);
static USER: LazyLock<EntitySchema> = LazyLock::new(user_schema);

/// Names of every defined entity, in `/schema` output order.
#[must_use]
pub const fn entity_names() -> &'static [&'static str] {
    &["product", "variant", "user"]
}

/// Look up an entity schema by name.
#[must_use]
pub fn entity(name: &str) -> Option<&'static EntitySchema> {
    match name {
        "product" => Some(product()),
        "variant" => Some(variant()),
        "user" => Some(user()),
        _ => None,
    }
}

/// The product schema. Stored in the `"product"` collection.
#[must_use]
pub fn product() -> &'static EntitySchema {
    &PRODUCT
}

/// The variant schema. Embedded in products; no collection of its own.
#[must_use]
pub fn variant() -> &'static EntitySchema {
    &VARIANT
}

/// The user schema. Declared for completeness; the `"user"` collection is
/// never populated or read by this service.
#[must_use]
pub fn user() -> &'static EntitySchema {
    &USER
}

fn product_schema() -> EntitySchema {
    EntitySchema::new(
        "product",
        vec![
            FieldSpec::text("title")
                .required()
                .non_empty()
                .hint("Product title"),
            FieldSpec::text("slug")
                .required()
                .non_empty()
                .hint("URL-friendly identifier, unique across products"),
            FieldSpec::text("description").hint("Product description"),
            FieldSpec::real("price")
                .required()
                .minimum(0.0)
                .hint("Price in dollars"),
            FieldSpec::real("compare_at_price")
                .minimum(0.0)
                .hint("Original price for comparison"),
            FieldSpec::text("category")
                .required()
                .non_empty()
                .hint("Product category"),
            FieldSpec::text_list("images")
                .default_value(json!([]))
                .hint("Image URLs, in display order"),
            FieldSpec::text("model_url").hint("3D model or Spline scene URL"),
            FieldSpec::nested_list("variants", "variant")
                .default_value(json!([]))
                .hint("Variant groups, in display order"),
            FieldSpec::text_list("badges")
                .default_value(json!([]))
                .hint("Trust or feature badges"),
            FieldSpec::real("rating")
                .minimum(0.0)
                .maximum(5.0)
                .default_value(json!(5.0))
                .hint("Average rating"),
            FieldSpec::integer("review_count")
                .minimum(0.0)
                .default_value(json!(0))
                .hint("Number of reviews"),
            FieldSpec::boolean("in_stock")
                .default_value(json!(true))
                .hint("Whether product is in stock"),
            FieldSpec::text_map("specs")
                .default_value(json!({}))
                .hint("Key-value specs"),
        ],
    )
}

fn variant_schema() -> EntitySchema {
    EntitySchema::new(
        "variant",
        vec![
            FieldSpec::text("name")
                .required()
                .non_empty()
                .hint("Variant name, e.g. Color or Size"),
            FieldSpec::text_list("options")
                .default_value(json!([]))
                .hint("Available options, in display order"),
        ],
    )
}

fn user_schema() -> EntitySchema {
    EntitySchema::new(
        "user",
        vec![
            FieldSpec::text("name").required().non_empty().hint("Full name"),
            FieldSpec::text("email")
                .required()
                .non_empty()
                .hint("Email address"),
            FieldSpec::text("address").required().non_empty().hint("Address"),
            FieldSpec::integer("age")
                .minimum(0.0)
                .maximum(120.0)
                .hint("Age in years"),
            FieldSpec::boolean("is_active")
                .default_value(json!(true))
                .hint("Whether user is active"),
        ],
    )
}
