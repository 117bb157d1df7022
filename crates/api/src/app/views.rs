//! HTML rendering.
//!
//! Views are pure consumers of loader output: they format products into cards and
//! pages and never call the repository themselves.

use std::collections::BTreeMap;

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

use startshop_products::{Badge, InventoryStatus, Product, ProductInput, ValidationErrors};

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("template registration failed: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("render failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

const TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("../../templates/layout.hbs")),
    ("product_card", include_str!("../../templates/product_card.hbs")),
    ("home", include_str!("../../templates/home.hbs")),
    ("listing", include_str!("../../templates/listing.hbs")),
    ("detail", include_str!("../../templates/detail.hbs")),
    ("create", include_str!("../../templates/create.hbs")),
    ("message", include_str!("../../templates/message.hbs")),
];

/// Card-ready projection of a [`Product`].
#[derive(Debug, Clone, Serialize)]
struct ProductCard {
    id: String,
    name: String,
    description: String,
    price: String,
    image: String,
    badge: Option<&'static str>,
    rating: String,
    reviews: u32,
    inventory: &'static str,
}

impl From<&Product> for ProductCard {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            description: p.description.clone(),
            price: format!("${:.2}", p.price),
            image: p.image.clone(),
            badge: p.badge.map(Badge::as_str),
            rating: format!("{:.1}", p.rating),
            reviews: p.reviews,
            inventory: p.inventory.label(),
        }
    }
}

fn cards(products: &[Product]) -> Vec<ProductCard> {
    products.iter().map(ProductCard::from).collect()
}

#[derive(Debug, Serialize)]
struct SelectOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

/// Values and feedback for the create-product form.
#[derive(Debug, Default)]
pub struct CreateFormView<'a> {
    pub values: Option<&'a ProductInput>,
    pub errors: Option<&'a ValidationErrors>,
    pub form_error: Option<String>,
}

/// Registry of compiled page templates.
pub struct Views {
    registry: Handlebars<'static>,
}

impl core::fmt::Debug for Views {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Views")
            .field("templates", &TEMPLATES.len())
            .finish()
    }
}

impl Views {
    pub fn new() -> Result<Self, ViewError> {
        let mut registry = Handlebars::new();
        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, *source)
                .map_err(Box::new)?;
        }
        Ok(Self { registry })
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, ViewError> {
        Ok(self.registry.render(name, data)?)
    }

    pub fn home(&self) -> Result<String, ViewError> {
        self.render("home", &serde_json::json!({ "title": "Home" }))
    }

    pub fn listing(&self, products: &[Product]) -> Result<String, ViewError> {
        self.render(
            "listing",
            &serde_json::json!({
                "title": "Products",
                "products": cards(products),
            }),
        )
    }

    pub fn detail(&self, product: &Product, recommended: &[Product]) -> Result<String, ViewError> {
        self.render(
            "detail",
            &serde_json::json!({
                "title": product.name,
                "product": ProductCard::from(product),
                "recommendedProducts": cards(recommended),
            }),
        )
    }

    pub fn create_form(&self, view: CreateFormView<'_>) -> Result<String, ViewError> {
        let blank = ProductInput::default();
        let values = view.values.unwrap_or(&blank);
        let selected_badge = values.badge.as_deref().unwrap_or("");

        let mut badges = vec![SelectOption {
            value: "",
            label: "None",
            selected: selected_badge.is_empty(),
        }];
        badges.extend(Badge::ALL.into_iter().map(|b| SelectOption {
            value: b.as_str(),
            label: b.as_str(),
            selected: b.as_str() == selected_badge,
        }));

        let inventories: Vec<_> = InventoryStatus::ALL
            .into_iter()
            .map(|i| SelectOption {
                value: i.as_str(),
                label: i.label(),
                selected: i.as_str() == values.inventory,
            })
            .collect();

        let errors: BTreeMap<&str, &str> = view
            .errors
            .map(|errs| {
                errs.errors()
                    .iter()
                    .rev()
                    .map(|e| (e.field, e.message.as_str()))
                    .collect()
            })
            .unwrap_or_default();

        self.render(
            "create",
            &serde_json::json!({
                "title": "Create Product",
                "values": {
                    "name": values.name,
                    "description": values.description,
                    "price": values.price,
                    "image": values.image,
                    "rating": values.rating.map(|r| r.to_string()).unwrap_or_default(),
                    "reviews": values.reviews.map(|r| r.to_string()).unwrap_or_default(),
                },
                "badges": badges,
                "inventories": inventories,
                "errors": errors,
                "formError": view.form_error,
            }),
        )
    }

    /// Standalone message page (not found, failures).
    pub fn message(&self, title: &str, message: &str) -> Result<String, ViewError> {
        self.render(
            "message",
            &serde_json::json!({ "title": title, "message": message }),
        )
    }
}
