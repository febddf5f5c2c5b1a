//! Idempotent demo-data seeding.
//!
//! Populates the product collection with two fixed demo products the first
//! time it is empty. "Already seeded" is a normal outcome, not an error.
//! The count check and the inserts are not atomic: two concurrent
//! first-time calls can both observe an empty collection and both insert.
//! A deployment that cares performs the first seed before accepting
//! traffic.

use serde::Serialize;
use serde_json::Value;

use vitrine_core::{Product, Variant};

use super::catalog::{CatalogError, CatalogService, PRODUCT_COLLECTION};

/// Outcome of a seeding run, returned verbatim as the `/seed` response.
#[derive(Debug, Clone, Serialize)]
pub struct SeedOutcome {
    /// Always `"ok"`; seeding has no failure modes of its own.
    pub status: String,
    /// What happened: seeded, or already present.
    pub message: String,
}

impl SeedOutcome {
    fn ok(message: &str) -> Self {
        Self {
            status: "ok".to_owned(),
            message: message.to_owned(),
        }
    }
}

impl CatalogService {
    /// Seed the demo products if the collection is empty.
    ///
    /// Inserts go through [`CatalogService::create_product`], so the
    /// fixtures pass the same validation as API payloads.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] if the store fails; a fixture that
    /// no longer validates surfaces as [`CatalogError::Invalid`].
    pub async fn seed(&self) -> Result<SeedOutcome, CatalogError> {
        let existing = self.store().count(PRODUCT_COLLECTION).await?;
        if existing > 0 {
            tracing::debug!(existing, "seed skipped, products already present");
            return Ok(SeedOutcome::ok("Products already present"));
        }

        for product in demo_products() {
            let payload: Value = serde_json::to_value(&product)?;
            let id = self.create_product(&payload).await?;
            tracing::info!(slug = %product.slug, id = %id, "seeded demo product");
        }

        Ok(SeedOutcome::ok("Seeded demo products"))
    }
}

/// The two demo products, fixed literal values. Insertion order matters:
/// it is the order `/api/products` lists them in.
pub(crate) fn demo_products() -> [Product; 2] {
    [
        Product {
            title: "Specter Series X1".to_owned(),
            slug: "specter-series-x1".to_owned(),
            description: Some("Monolithic precision. Forged for power.".to_owned()),
            price: 1299.0,
            compare_at_price: Some(1499.0),
            category: "hardware".to_owned(),
            images: vec![
                "https://images.unsplash.com/photo-1527443154391-507e9dc6c5cc?q=80&w=1600&auto=format&fit=crop".to_owned(),
                "https://images.unsplash.com/photo-1542751371-adc38448a05e?q=80&w=1600&auto=format&fit=crop".to_owned(),
            ],
            model_url: Some(
                "https://prod.spline.design/8J9sS3L8q1sV9t8A/scene.splinecode".to_owned(),
            ),
            variants: vec![
                Variant {
                    name: "Finish".to_owned(),
                    options: vec!["Obsidian Black".to_owned(), "Liquid Silver".to_owned()],
                },
                Variant {
                    name: "Capacity".to_owned(),
                    options: vec!["256GB".to_owned(), "512GB".to_owned(), "1TB".to_owned()],
                },
            ],
            badges: vec![
                "2-Year Warranty".to_owned(),
                "Free Express Shipping".to_owned(),
                "30-Day Returns".to_owned(),
            ],
            rating: 4.9,
            review_count: 312,
            in_stock: true,
            specs: [
                ("CPU".to_owned(), "NeonCore M3".to_owned()),
                ("GPU".to_owned(), "RayFlux 8G".to_owned()),
                ("Weight".to_owned(), "1.2kg".to_owned()),
            ]
            .into(),
        },
        Product {
            title: "Nebula Pro V".to_owned(),
            slug: "nebula-pro-v".to_owned(),
            description: Some("Zero compromise. Ultra light.".to_owned()),
            price: 999.0,
            compare_at_price: Some(1199.0),
            category: "hardware".to_owned(),
            images: vec![
                "https://images.unsplash.com/photo-1555617981-dac3880d511d?q=80&w=1600&auto=format&fit=crop".to_owned(),
                "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?q=80&w=1600&auto=format&fit=crop".to_owned(),
            ],
            model_url: Some(
                "https://prod.spline.design/G8j2l6m1y7X2m6xD/scene.splinecode".to_owned(),
            ),
            variants: vec![
                Variant {
                    name: "Finish".to_owned(),
                    options: vec!["Chrome".to_owned(), "Graphite".to_owned()],
                },
                Variant {
                    name: "Capacity".to_owned(),
                    options: vec!["128GB".to_owned(), "256GB".to_owned(), "512GB".to_owned()],
                },
            ],
            badges: vec!["Premium Support".to_owned(), "Insured Delivery".to_owned()],
            rating: 4.8,
            review_count: 198,
            in_stock: true,
            specs: [
                ("CPU".to_owned(), "IonDrive X".to_owned()),
                ("Display".to_owned(), "120Hz OLED".to_owned()),
                ("Weight".to_owned(), "0.98kg".to_owned()),
            ]
            .into(),
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use std::sync::Arc;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_fixtures_pass_product_validation() {
        for product in demo_products() {
            let raw = serde_json::to_value(&product).unwrap();
            vitrine_core::schema::product().validate(&raw).unwrap();
        }
    }

    #[tokio::test]
    async fn test_seed_inserts_exactly_two_products_in_order() {
        let catalog = service();
        let outcome = catalog.seed().await.unwrap();
        assert_eq!(outcome.status, "ok");
        assert_eq!(outcome.message, "Seeded demo products");

        let products = catalog.list_products(20).await.unwrap();
        let slugs: Vec<&str> = products
            .iter()
            .map(|p| p["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, vec!["specter-series-x1", "nebula-pro-v"]);
    }

    #[tokio::test]
    async fn test_second_seed_is_a_no_op() {
        let catalog = service();
        catalog.seed().await.unwrap();
        let before = catalog.list_products(20).await.unwrap();

        let outcome = catalog.seed().await.unwrap();
        assert_eq!(outcome.status, "ok");
        assert_eq!(outcome.message, "Products already present");

        let after = catalog.list_products(20).await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_seed_skips_even_with_non_demo_products_present() {
        let catalog = service();
        catalog
            .create_product(&serde_json::json!({
                "title": "Widget",
                "slug": "widget",
                "price": 10.0,
                "category": "hardware",
            }))
            .await
            .unwrap();

        let outcome = catalog.seed().await.unwrap();
        assert_eq!(outcome.message, "Products already present");
        assert_eq!(catalog.list_products(20).await.unwrap().len(), 1);
    }
}
