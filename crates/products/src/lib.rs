//! Products domain module.
//!
//! This crate contains the catalog's product entity, its enumerations, and the
//! pure validation applied to create-product input (no IO, no HTTP, no storage).

pub mod catalog;
pub mod product;
pub mod validation;

pub use catalog::sample_catalog;
pub use product::{Badge, InventoryStatus, NewProduct, Product};
pub use validation::{
    validate, FieldError, ProductInput, ValidationErrors, IMAGE_MAX_LEN, PRICE_MAX_INTEGER_DIGITS,
    PRICE_MAX_SCALE, REVIEWS_MAX,
};
