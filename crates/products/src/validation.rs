//! Create-product input validation.
//!
//! `validate` is a pure function: it checks every field, collects all failures,
//! and only returns a [`NewProduct`] when the whole input is acceptable. Callers run
//! it before touching any store.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::product::{Badge, InventoryStatus, NewProduct};

/// Maximum accepted length of the image URL.
pub const IMAGE_MAX_LEN: usize = 512;

/// Fractional digits a stored price keeps (`NUMERIC(10, 2)`).
pub const PRICE_MAX_SCALE: u32 = 2;

/// Digits allowed before the decimal point (`NUMERIC(10, 2)`).
pub const PRICE_MAX_INTEGER_DIGITS: u32 = 8;

/// Largest review count a stored product can hold (`INTEGER`).
pub const REVIEWS_MAX: u32 = i32::MAX as u32;

/// Raw create-product input as submitted by a form or JSON client.
///
/// Numeric fields are optional so that a missing or unparsable value surfaces as a
/// field error rather than a deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews: Option<i64>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub inventory: String,
}

impl Default for ProductInput {
    /// Blank form: empty text, zero rating/reviews, in stock, no badge.
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            badge: None,
            rating: Some(0.0),
            reviews: Some(0),
            image: String::new(),
            inventory: InventoryStatus::default().as_str().to_string(),
        }
    }
}

/// One failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All field failures of one input, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Error)]
#[error("{}", joined(&.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First message reported for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn joined(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate raw input into a [`NewProduct`].
pub fn validate(input: &ProductInput) -> Result<NewProduct, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = input.name.trim();
    if name.is_empty() {
        errors.push("name", "Name is required");
    }

    let description = input.description.trim();
    if description.is_empty() {
        errors.push("description", "Description is required");
    }

    let price = match Decimal::from_str(input.price.trim()) {
        Ok(p) if p.is_sign_negative() && !p.is_zero() => {
            errors.push("price", "Price must not be negative");
            None
        }
        Ok(p) if p.normalize().scale() > PRICE_MAX_SCALE => {
            errors.push("price", "Price must have at most 2 decimal places");
            None
        }
        Ok(p) if p.trunc() >= Decimal::from(10u64.pow(PRICE_MAX_INTEGER_DIGITS)) => {
            errors.push("price", "Price must be less than 100000000");
            None
        }
        Ok(mut p) => {
            p.rescale(PRICE_MAX_SCALE);
            Some(p)
        }
        Err(_) => {
            errors.push("price", "Price must be a number");
            None
        }
    };

    let badge = match input.badge.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match Badge::from_str(raw) {
            Ok(b) => Some(b),
            Err(_) => {
                errors.push("badge", "Badge must be one of New, Sale, Featured, Limited");
                None
            }
        },
    };

    let rating = match input.rating {
        Some(r) if r.is_finite() && r >= 0.0 => Some(r),
        _ => {
            errors.push("rating", "Rating is required");
            None
        }
    };

    let reviews = match input.reviews {
        Some(n) => match u32::try_from(n).ok().filter(|n| *n <= REVIEWS_MAX) {
            Some(n) => Some(n),
            None => {
                errors.push(
                    "reviews",
                    format!("Reviews must be between 0 and {REVIEWS_MAX}"),
                );
                None
            }
        },
        None => {
            errors.push("reviews", "Reviews is required");
            None
        }
    };

    let image = input.image.trim();
    if url::Url::parse(image).is_err() {
        errors.push("image", "Image must be a valid URL");
    }
    if image.chars().count() > IMAGE_MAX_LEN {
        errors.push("image", "Image must be 512 chars or less");
    }

    let inventory = match InventoryStatus::from_str(input.inventory.trim()) {
        Ok(i) => Some(i),
        Err(_) => {
            errors.push(
                "inventory",
                "Inventory must be one of in-stock, backorder, preorder",
            );
            None
        }
    };

    match (price, rating, reviews, inventory) {
        (Some(price), Some(rating), Some(reviews), Some(inventory)) if errors.is_empty() => {
            Ok(NewProduct {
                name: name.to_string(),
                description: description.to_string(),
                price,
                image: image.to_string(),
                badge,
                rating,
                reviews,
                inventory,
            })
        }
        _ => Err(errors),
    }
}
