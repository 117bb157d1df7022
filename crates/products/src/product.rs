use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use startshop_core::{DomainError, Entity, ProductId, ValueObject};

/// Merchandising badge shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    New,
    Sale,
    Featured,
    Limited,
}

impl Badge {
    pub const ALL: [Badge; 4] = [Badge::New, Badge::Sale, Badge::Featured, Badge::Limited];

    pub fn as_str(self) -> &'static str {
        match self {
            Badge::New => "New",
            Badge::Sale => "Sale",
            Badge::Featured => "Featured",
            Badge::Limited => "Limited",
        }
    }
}

impl ValueObject for Badge {}

impl core::fmt::Display for Badge {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Badge {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Badge::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| DomainError::unknown_variant("badge", s))
    }
}

/// Stock availability of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InventoryStatus {
    #[default]
    InStock,
    Backorder,
    Preorder,
}

impl InventoryStatus {
    pub const ALL: [InventoryStatus; 3] = [
        InventoryStatus::InStock,
        InventoryStatus::Backorder,
        InventoryStatus::Preorder,
    ];

    /// Wire/storage form (`in-stock`, `backorder`, `preorder`).
    pub fn as_str(self) -> &'static str {
        match self {
            InventoryStatus::InStock => "in-stock",
            InventoryStatus::Backorder => "backorder",
            InventoryStatus::Preorder => "preorder",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            InventoryStatus::InStock => "In Stock",
            InventoryStatus::Backorder => "Backorder",
            InventoryStatus::Preorder => "Preorder",
        }
    }
}

impl ValueObject for InventoryStatus {}

impl core::fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InventoryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InventoryStatus::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| DomainError::unknown_variant("inventory status", s))
    }
}

/// A validated product that has not been persisted yet (no id).
///
/// Only [`crate::validate`] produces values of this type from user input, so every
/// `NewProduct` satisfies the catalog invariants (non-empty name, non-negative
/// price/rating/reviews, bounded image URL).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub badge: Option<Badge>,
    pub rating: f64,
    pub reviews: u32,
    pub inventory: InventoryStatus,
}

/// Persisted catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub badge: Option<Badge>,
    pub rating: f64,
    pub reviews: u32,
    pub inventory: InventoryStatus,
}

impl Product {
    /// Attach a store-assigned id to validated data.
    pub fn from_new(id: ProductId, new: NewProduct) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            image: new.image,
            badge: new.badge,
            rating: new.rating,
            reviews: new.reviews,
            inventory: new.inventory,
        }
    }

    /// Whether every field except `id` equals `new`.
    pub fn matches(&self, new: &NewProduct) -> bool {
        self.name == new.name
            && self.description == new.description
            && self.price == new.price
            && self.image == new.image
            && self.badge == new.badge
            && self.rating == new.rating
            && self.reviews == new.reviews
            && self.inventory == new.inventory
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
