//! Deterministic demo storefront catalog.
//!
//! Used by the CLI smoke command and server bootstrap when no external
//! catalog is wired up. Ids are stable so persisted behavior snapshots keep
//! resolving across runs.

use vitrine_core::domain::product::{Product, ProductId};

fn product(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    brand: Option<&str>,
    price: f64,
    rating: f64,
    reviews: u32,
    features: &[&str],
    in_stock: bool,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        brand: brand.map(str::to_string),
        price,
        rating,
        reviews,
        features: features.iter().map(|feature| feature.to_string()).collect(),
        in_stock,
    }
}

pub fn demo_catalog() -> Vec<Product> {
    vec![
        product(
            "1",
            "Aurora Wireless Headphones",
            "Over-ear wireless headphones with active noise cancellation",
            "audio",
            Some("Soniq"),
            199.99,
            4.6,
            812,
            &["noise cancellation", "bluetooth", "40h battery"],
            true,
        ),
        product(
            "2",
            "Aurora Sport Earbuds",
            "Sweat-resistant in-ear buds for workouts",
            "audio",
            Some("Soniq"),
            89.99,
            4.2,
            455,
            &["bluetooth", "water resistant"],
            true,
        ),
        product(
            "3",
            "Metro Bookshelf Speaker",
            "Compact powered speaker pair with warm mids",
            "audio",
            Some("Kavo"),
            249.00,
            4.4,
            198,
            &["bluetooth", "aux input"],
            true,
        ),
        product(
            "4",
            "Nova 14 Laptop",
            "Thin 14-inch laptop for everyday work",
            "computers",
            Some("Nova"),
            1099.00,
            4.5,
            623,
            &["14 inch", "16GB RAM", "512GB SSD"],
            true,
        ),
        product(
            "5",
            "Nova 16 Creator Laptop",
            "16-inch laptop with a dedicated GPU for creative work",
            "computers",
            Some("Nova"),
            1899.00,
            4.7,
            341,
            &["16 inch", "32GB RAM", "dedicated GPU"],
            false,
        ),
        product(
            "6",
            "Pixelline 27 Monitor",
            "27-inch 4K monitor with factory calibration",
            "computers",
            Some("Pixelline"),
            449.00,
            4.3,
            287,
            &["4k", "usb-c", "calibrated"],
            true,
        ),
        product(
            "7",
            "Drift Mechanical Keyboard",
            "Hot-swappable mechanical keyboard with PBT caps",
            "accessories",
            Some("Drift"),
            129.00,
            4.8,
            904,
            &["hot-swappable", "rgb", "usb-c"],
            true,
        ),
        product(
            "8",
            "Drift Wireless Mouse",
            "Lightweight wireless mouse with adjustable DPI",
            "accessories",
            Some("Drift"),
            59.00,
            4.1,
            512,
            &["wireless", "adjustable dpi"],
            true,
        ),
        product(
            "9",
            "Lumo Desk Lamp",
            "Dimmable desk lamp with adjustable color temperature",
            "home",
            Some("Lumo"),
            39.99,
            4.0,
            233,
            &["dimmable", "usb charging"],
            true,
        ),
        product(
            "10",
            "Lumo Floor Lamp",
            "Tall ambient floor lamp for living spaces",
            "home",
            Some("Lumo"),
            89.99,
            3.8,
            121,
            &["dimmable"],
            true,
        ),
        product(
            "11",
            "Summit Smart Watch",
            "Fitness tracking watch with a week of battery",
            "wearables",
            Some("Summit"),
            299.00,
            4.4,
            768,
            &["heart rate", "gps", "7d battery"],
            true,
        ),
        product(
            "12",
            "Summit Fitness Band",
            "Slim activity band with sleep tracking",
            "wearables",
            Some("Summit"),
            79.00,
            3.9,
            389,
            &["sleep tracking", "water resistant"],
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::demo_catalog;

    #[test]
    fn demo_ids_are_unique_and_stable() {
        let catalog = demo_catalog();
        let ids: HashSet<_> = catalog.iter().map(|product| product.id.clone()).collect();
        assert_eq!(ids.len(), catalog.len());
        assert_eq!(catalog[0].id.as_str(), "1");
    }

    #[test]
    fn demo_catalog_spans_multiple_categories() {
        let categories: HashSet<_> =
            demo_catalog().into_iter().map(|product| product.category).collect();
        assert!(categories.len() >= 4);
    }
}
