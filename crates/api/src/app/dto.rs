use serde::{Deserialize, Serialize};

use startshop_products::{FieldError, Product, ProductInput};

// -------------------------
// Request DTOs
// -------------------------

/// Urlencoded create-product form. Every field arrives as text.
#[derive(Debug, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub reviews: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub inventory: String,
}

impl From<ProductForm> for ProductInput {
    /// Unparsable numbers become `None` so validation reports them per field.
    fn from(form: ProductForm) -> Self {
        let badge = Some(form.badge).filter(|b| !b.trim().is_empty());
        Self {
            name: form.name,
            description: form.description,
            price: form.price,
            badge,
            rating: form.rating.trim().parse().ok(),
            reviews: form.reviews.trim().parse().ok(),
            image: form.image,
            inventory: form.inventory,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse<'a> {
    pub error: &'static str,
    pub message: String,
    pub fields: &'a [FieldError],
}
