//! Built-in sample catalog.
//!
//! Ids are fixed so that detail URLs stay stable across restarts of a
//! fixture-backed process.

use rust_decimal::Decimal;
use uuid::Uuid;

use startshop_core::ProductId;

use crate::product::{Badge, InventoryStatus, Product};

fn fixture_id(n: u128) -> ProductId {
    ProductId::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0000 | n))
}

/// The sample products, in catalog order.
pub fn sample_catalog() -> Vec<Product> {
    vec![
        Product {
            id: fixture_id(1),
            name: "Aurora Desk Lamp".to_string(),
            description: "Dimmable LED lamp with a brushed aluminium arm and warm-to-cool colour control."
                .to_string(),
            price: Decimal::new(7900, 2),
            image: "https://images.unsplash.com/photo-1507473885765-e6ed057f782c".to_string(),
            badge: Some(Badge::New),
            rating: 4.7,
            reviews: 128,
            inventory: InventoryStatus::InStock,
        },
        Product {
            id: fixture_id(2),
            name: "Canvas Maker Apron".to_string(),
            description: "Waxed canvas apron with leather straps and six tool pockets.".to_string(),
            price: Decimal::new(4500, 2),
            image: "https://images.unsplash.com/photo-1556909114-f6e7ad7d3136".to_string(),
            badge: Some(Badge::Sale),
            rating: 4.4,
            reviews: 56,
            inventory: InventoryStatus::InStock,
        },
        Product {
            id: fixture_id(3),
            name: "Mechanical Keyboard Kit".to_string(),
            description: "Hot-swappable 75% board kit with gasket mount and aluminium case.".to_string(),
            price: Decimal::new(14900, 2),
            image: "https://images.unsplash.com/photo-1587829741301-dc798b83add3".to_string(),
            badge: Some(Badge::Featured),
            rating: 4.9,
            reviews: 342,
            inventory: InventoryStatus::Backorder,
        },
        Product {
            id: fixture_id(4),
            name: "Walnut Monitor Stand".to_string(),
            description: "Solid walnut riser with a hidden cable channel.".to_string(),
            price: Decimal::new(8900, 2),
            image: "https://images.unsplash.com/photo-1593062096033-9a26b09da705".to_string(),
            badge: None,
            rating: 4.5,
            reviews: 77,
            inventory: InventoryStatus::InStock,
        },
        Product {
            id: fixture_id(5),
            name: "Field Notes Set".to_string(),
            description: "Three dot-grid pocket notebooks bound with recycled covers.".to_string(),
            price: Decimal::new(1400, 2),
            image: "https://images.unsplash.com/photo-1531346878377-a5be20888e57".to_string(),
            badge: None,
            rating: 4.2,
            reviews: 19,
            inventory: InventoryStatus::InStock,
        },
        Product {
            id: fixture_id(6),
            name: "Limited Edition Tool Roll".to_string(),
            description: "Numbered run of hand-stitched leather tool rolls.".to_string(),
            price: Decimal::new(12000, 2),
            image: "https://images.unsplash.com/photo-1581235720704-06d3acfcb36f".to_string(),
            badge: Some(Badge::Limited),
            rating: 5.0,
            reviews: 8,
            inventory: InventoryStatus::Preorder,
        },
    ]
}
