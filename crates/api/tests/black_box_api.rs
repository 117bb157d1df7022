use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use startshop_core::ProductId;
use startshop_infra::{FixtureProductStore, ProductRepository, ProductStore, StoreError};
use startshop_products::{sample_catalog, NewProduct, Product};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(store: Arc<dyn ProductStore>) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = startshop_api::app::build_app(ProductRepository::new(store))
            .expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn with_fixtures() -> Self {
        Self::spawn(Arc::new(FixtureProductStore::with_sample_catalog())).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Store that is unreachable for every operation.
struct UnreachableStore;

#[async_trait]
impl ProductStore for UnreachableStore {
    async fn fetch_all(&self, _limit: Option<usize>) -> Result<Vec<Product>, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn fetch_by_id(&self, _id: ProductId) -> Result<Option<Product>, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn insert(&self, _product: NewProduct) -> Result<Option<Product>, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }
}

fn no_redirects() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn valid_body() -> serde_json::Value {
    json!({
        "name": "Soldering Station",
        "description": "Temperature-controlled, 60W.",
        "price": "89.90",
        "badge": "New",
        "rating": 4.6,
        "reviews": 31,
        "image": "https://images.example.com/soldering.jpg",
        "inventory": "in-stock",
    })
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::with_fixtures().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn listing_page_shows_every_fixture_product() {
    let srv = TestServer::with_fixtures().await;
    let res = reqwest::get(format!("{}/products", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let html = res.text().await.unwrap();
    for product in sample_catalog() {
        assert!(html.contains(&product.name), "missing {}", product.name);
    }
}

#[tokio::test]
async fn detail_page_renders_product_and_recommendations() {
    let srv = TestServer::with_fixtures().await;
    let catalog = sample_catalog();
    let res = reqwest::get(format!("{}/products/{}", srv.base_url, catalog[5].id))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let html = res.text().await.unwrap();
    assert!(html.contains(&catalog[5].name));
    assert!(html.contains("Recommended Products"));
    for recommended in &catalog[..3] {
        assert!(html.contains(&recommended.name));
    }
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let srv = TestServer::with_fixtures().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/products/zzz", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.text().await.unwrap().contains("Product not found"));

    let res = client
        .get(format!("{}/api/products/{}", srv.base_url, ProductId::new()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn api_detail_uses_presentation_contract() {
    let srv = TestServer::with_fixtures().await;
    let catalog = sample_catalog();
    let res = reqwest::get(format!("{}/api/products/{}", srv.base_url, catalog[3].id))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["product"]["id"], catalog[3].id.to_string());
    let recommended: Vec<_> = body["recommendedProducts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    let expected: Vec<_> = catalog[..3].iter().map(|p| p.id.to_string()).collect();
    assert_eq!(recommended, expected);
}

#[tokio::test]
async fn api_create_then_read_back() {
    let srv = TestServer::with_fixtures().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/products", srv.base_url))
        .json(&valid_body())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["name"], "Soldering Station");
    assert_eq!(created["price"], "89.90");
    let id = created["id"].as_str().unwrap().to_string();

    let res = client
        .get(format!("{}/api/products", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let ids: Vec<_> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids.len(), sample_catalog().len() + 1);
    assert_eq!(ids.last(), Some(&id));
}

#[tokio::test]
async fn api_create_rejects_blank_name_with_field_errors() {
    let srv = TestServer::with_fixtures().await;
    let mut body = valid_body();
    body["name"] = json!("");

    let res = reqwest::Client::new()
        .post(format!("{}/api/products", srv.base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["fields"][0]["field"], "name");
    assert_eq!(body["fields"][0]["message"], "Name is required");
}

#[tokio::test]
async fn api_create_rejects_wrongly_typed_fields_as_json() {
    let srv = TestServer::with_fixtures().await;
    let client = reqwest::Client::new();

    let mut body = valid_body();
    body["rating"] = json!("4.5");
    let res = client
        .post(format!("{}/api/products", srv.base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_body");
    assert!(body["message"].as_str().unwrap().contains("rating"));

    let res = client
        .post(format!("{}/api/products", srv.base_url))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_body");

    // Nothing was stored.
    let res = client
        .get(format!("{}/api/products", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["products"].as_array().unwrap().len(), sample_catalog().len());
}

#[tokio::test]
async fn api_create_rejects_prices_the_store_cannot_hold() {
    let srv = TestServer::with_fixtures().await;
    let mut body = valid_body();
    body["price"] = json!("12.345");

    let res = reqwest::Client::new()
        .post(format!("{}/api/products", srv.base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["fields"][0]["field"], "price");
    assert_eq!(body["fields"][0]["message"], "Price must have at most 2 decimal places");
}

#[tokio::test]
async fn form_submission_redirects_to_new_product() {
    let srv = TestServer::with_fixtures().await;
    let client = no_redirects();

    let res = client
        .post(format!("{}/products/create-product", srv.base_url))
        .form(&[
            ("name", "Bench Grinder"),
            ("description", "Variable speed."),
            ("price", "129.00"),
            ("badge", ""),
            ("rating", "0"),
            ("reviews", "0"),
            ("image", "https://images.example.com/grinder.jpg"),
            ("inventory", "backorder"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let location = res.headers()["location"].to_str().unwrap().to_string();
    assert!(location.starts_with("/products/"));

    let res = client
        .get(format!("{}{}", srv.base_url, location))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("Bench Grinder"));
}

#[tokio::test]
async fn invalid_form_is_rerendered_with_errors() {
    let srv = TestServer::with_fixtures().await;
    let res = no_redirects()
        .post(format!("{}/products/create-product", srv.base_url))
        .form(&[
            ("name", ""),
            ("description", "Kept"),
            ("price", "abc"),
            ("image", "not-a-url"),
            ("inventory", "in-stock"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = res.text().await.unwrap();
    assert!(html.contains("Name is required"));
    assert!(html.contains("Price must be a number"));
    assert!(html.contains("Image must be a valid URL"));
    assert!(html.contains("Kept"));
}

#[tokio::test]
async fn create_form_page_renders() {
    let srv = TestServer::with_fixtures().await;
    let res = reqwest::get(format!("{}/products/create-product", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("Create Product"));
}

#[tokio::test]
async fn unreachable_store_degrades_reads_but_fails_writes() {
    let srv = TestServer::spawn(Arc::new(UnreachableStore)).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/products", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["products"].as_array().unwrap().is_empty());

    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("No products available right now."));

    let res = client
        .post(format!("{}/api/products", srv.base_url))
        .json(&valid_body())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "store_error");
}
