//! Typed entity models.
//!
//! These structs mirror the declarative schemas in [`crate::schema`] and
//! exist for code that builds records programmatically (the demo seeding
//! fixtures, tests). The raw-record path through the API validates against
//! the schema directly and never round-trips through these types.
//!
//! A test below asserts each struct's serialised field set matches its
//! schema, so the two definitions cannot drift apart silently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named option group embedded in a [`Product`].
///
/// Variants have no independent lifecycle; they are copied into the product
/// document that owns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Group name, e.g. "Color" or "Size".
    pub name: String,
    /// Available options, in display order. May be empty.
    #[serde(default)]
    pub options: Vec<String>,
}

/// A catalog entry, stored in the `"product"` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product title.
    pub title: String,
    /// URL-friendly identifier, unique across products.
    pub slug: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in dollars. Non-negative.
    pub price: f64,
    /// Original price for comparison. No relationship to `price` is
    /// enforced; it may be lower.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<f64>,
    /// Product category.
    pub category: String,
    /// Image URLs, in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// 3D model or Spline scene URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,
    /// Variant groups, in display order.
    #[serde(default)]
    pub variants: Vec<Variant>,
    /// Trust or feature badges.
    #[serde(default)]
    pub badges: Vec<String>,
    /// Average rating in [0, 5].
    #[serde(default = "default_rating")]
    pub rating: f64,
    /// Number of reviews.
    #[serde(default)]
    pub review_count: u32,
    /// Whether the product is in stock.
    #[serde(default = "default_true")]
    pub in_stock: bool,
    /// Key-value specs. Key order is irrelevant.
    #[serde(default)]
    pub specs: BTreeMap<String, String>,
}

/// A user record. Declared for schema completeness only: no service or
/// endpoint in this system reads or writes the `"user"` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Postal address.
    pub address: String,
    /// Age in years, in [0, 120].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    /// Whether the user is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_rating() -> f64 {
    5.0
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema;
    use serde_json::json;

    /// A product with every field populated, including the optionals.
    fn full_product() -> Product {
        Product {
            title: "Widget".to_owned(),
            slug: "widget".to_owned(),
            description: Some("A widget.".to_owned()),
            price: 10.0,
            compare_at_price: Some(12.0),
            category: "hardware".to_owned(),
            images: vec!["https://example.com/w.jpg".to_owned()],
            model_url: Some("https://example.com/w.spline".to_owned()),
            variants: vec![Variant {
                name: "Color".to_owned(),
                options: vec!["Red".to_owned(), "Blue".to_owned()],
            }],
            badges: vec!["Tested".to_owned()],
            rating: 4.5,
            review_count: 3,
            in_stock: true,
            specs: BTreeMap::from([("Weight".to_owned(), "1kg".to_owned())]),
        }
    }

    fn serialised_keys<T: serde::Serialize>(value: &T) -> Vec<String> {
        let json = serde_json::to_value(value).unwrap();
        json.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_product_struct_matches_schema_field_set() {
        let mut struct_fields = serialised_keys(&full_product());
        struct_fields.sort_unstable();

        let mut schema_fields: Vec<String> = schema::product()
            .fields()
            .iter()
            .map(|f| f.name().to_owned())
            .collect();
        schema_fields.sort_unstable();

        assert_eq!(struct_fields, schema_fields);
    }

    #[test]
    fn test_user_struct_matches_schema_field_set() {
        let user = User {
            name: "A".to_owned(),
            email: "a@b.c".to_owned(),
            address: "1 Way".to_owned(),
            age: Some(30),
            is_active: true,
        };
        let mut struct_fields = serialised_keys(&user);
        struct_fields.sort_unstable();

        let mut schema_fields: Vec<String> = schema::user()
            .fields()
            .iter()
            .map(|f| f.name().to_owned())
            .collect();
        schema_fields.sort_unstable();

        assert_eq!(struct_fields, schema_fields);
    }

    #[test]
    fn test_serialised_product_passes_schema_validation() {
        let raw = serde_json::to_value(full_product()).unwrap();
        let normalised = schema::product().validate(&raw).unwrap();
        assert_eq!(serde_json::Value::Object(normalised), raw);
    }

    #[test]
    fn test_deserialise_applies_defaults() {
        let product: Product = serde_json::from_value(json!({
            "title": "Widget",
            "slug": "widget",
            "price": 10.0,
            "category": "hardware",
        }))
        .unwrap();

        assert!((product.rating - 5.0).abs() < f64::EPSILON);
        assert_eq!(product.review_count, 0);
        assert!(product.in_stock);
        assert!(product.images.is_empty());
        assert!(product.description.is_none());
    }
}
