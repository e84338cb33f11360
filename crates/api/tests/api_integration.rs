//! Integration tests for the API server.

use std::path::Path;
use std::sync::OnceLock;

use api::AppState;
use api::config::Config;
use api::container::Container;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup_with_config(config: &Config) -> axum::Router {
    let state = AppState::new(Container::in_memory(), config, get_metrics_handle());
    api::create_app(state)
}

fn setup() -> axum::Router {
    setup_with_config(&Config::default())
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn product_body(name: &str, sku: &str, category: &str, price_cents: i64, stock: i64) -> Value {
    json!({
        "name": name,
        "description": format!("{name} description"),
        "priceCents": price_cents,
        "category": { "id": category, "name": category.to_uppercase() },
        "sku": sku,
        "stockQuantity": stock,
    })
}

async fn create_product(app: &axum::Router, body: Value) -> Value {
    let (status, json) = send(app, "POST", "/api/products", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json
}

async fn seed_products(app: &axum::Router) {
    for body in [
        product_body("Phone", "SKU-1", "electronics", 50_000, 0),
        product_body("Cable", "SKU-2", "electronics", 999, 3),
        product_body("Novel", "SKU-3", "books", 1_500, 40),
        product_body("Atlas", "SKU-4", "books", 4_000, 5),
    ] {
        create_product(app, body).await;
    }
}

fn names(json: &Value) -> Vec<String> {
    let mut names: Vec<String> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();
    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["engine"], "memory");
}

#[tokio::test]
async fn test_create_and_get_product() {
    let app = setup();
    let created = create_product(&app, product_body("Lamp", "SKU-9", "home", 2_599, 4)).await;

    assert_eq!(created["name"], "Lamp");
    assert_eq!(created["priceCents"], 2_599);
    assert_eq!(created["price"], "$25.99");
    assert_eq!(created["stockQuantity"], 4);
    assert_eq!(created["inStock"], true);
    assert_eq!(created["category"]["id"], "home");

    let id = created["id"].as_str().unwrap();
    let (status, json) = send(&app, "GET", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sku"], "SKU-9");
    assert_eq!(json["description"], "Lamp description");
}

#[tokio::test]
async fn test_create_product_validation_errors() {
    let app = setup();

    let (status, json) = send(
        &app,
        "POST",
        "/api/products",
        Some(product_body("", "SKU-1", "home", 100, 1)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Product name cannot be empty");

    let (status, json) = send(
        &app,
        "POST",
        "/api/products",
        Some(product_body("Lamp", "SKU-1", "home", -1, 1)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Product price cannot be negative");

    let (status, json) = send(
        &app,
        "POST",
        "/api/products",
        Some(product_body("Lamp", "SKU-1", "home", 100, -3)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Product stock quantity cannot be negative");

    let (status, json) = send(
        &app,
        "POST",
        "/api/products",
        Some(product_body("Lamp", "SKU-1", "", 100, 1)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Category ID is required");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = setup();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/products")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn test_duplicate_sku_conflicts() {
    let app = setup();
    create_product(&app, product_body("Lamp", "SKU-9", "home", 100, 1)).await;

    let (status, json) = send(
        &app,
        "POST",
        "/api/products",
        Some(product_body("Other Lamp", "SKU-9", "home", 100, 1)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn test_get_missing_and_invalid_product_id() {
    let app = setup();

    let uri = "/api/products/00000000-0000-0000-0000-000000000000";
    let (status, json) = send(&app, "GET", uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Product not found");

    let (status, json) = send(&app, "GET", "/api/products/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn test_list_products_by_category() {
    let app = setup();
    seed_products(&app).await;

    let (status, json) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 4);

    let (status, json) = send(&app, "GET", "/api/products?categoryId=books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), vec!["Atlas", "Novel"]);
}

#[tokio::test]
async fn test_update_product_partially() {
    let app = setup();
    let created = create_product(&app, product_body("Lamp", "SKU-9", "home", 2_599, 4)).await;
    let id = created["id"].as_str().unwrap();

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/api/products/{id}"),
        Some(json!({ "priceCents": 1_999, "category": { "id": "garden", "name": "Garden" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Lamp");
    assert_eq!(json["priceCents"], 1_999);
    assert_eq!(json["category"]["id"], "garden");

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/products/{id}"),
        Some(json!({ "name": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_product() {
    let app = setup();
    let created = create_product(&app, product_body("Lamp", "SKU-9", "home", 100, 1)).await;
    let uri = format!("/api/products/{}", created["id"].as_str().unwrap());

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stock_adjustments() {
    let app = setup();
    let created = create_product(&app, product_body("Lamp", "SKU-9", "home", 100, 2)).await;
    let id = created["id"].as_str().unwrap();

    let (status, json) = send(
        &app,
        "POST",
        &format!("/api/products/{id}/stock/increase"),
        Some(json!({ "quantity": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stockQuantity"], 5);

    let (status, json) = send(
        &app,
        "POST",
        &format!("/api/products/{id}/stock/decrease"),
        Some(json!({ "quantity": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stockQuantity"], 0);
    assert_eq!(json["inStock"], false);

    let (status, json) = send(
        &app,
        "POST",
        &format!("/api/products/{id}/stock/decrease"),
        Some(json!({ "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .starts_with("Insufficient stock")
    );

    let (status, json) = send(
        &app,
        "POST",
        &format!("/api/products/{id}/stock/increase"),
        Some(json!({ "quantity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Quantity must be positive");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/products/{id}/stock/increase"),
        Some(json!({ "quantity": -2 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_find_by_sku() {
    let app = setup();
    seed_products(&app).await;

    let (status, json) = send(&app, "GET", "/api/products/sku/SKU-3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Novel");

    let (status, _) = send(&app, "GET", "/api/products/sku/SKU-404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_by_price_range() {
    let app = setup();
    seed_products(&app).await;

    let (status, json) = send(
        &app,
        "GET",
        "/api/products/search?minPrice=999&maxPrice=4000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), vec!["Atlas", "Cable", "Novel"]);

    let (status, json) = send(&app, "GET", "/api/products/search?minPrice=2000", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), vec!["Atlas", "Phone"]);

    let (status, _) = send(
        &app,
        "GET",
        "/api/products/search?minPrice=10&maxPrice=1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(&app, "GET", "/api/products/search?minPrice=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn test_stock_level_queries() {
    let app = setup();
    seed_products(&app).await;

    let (status, json) = send(&app, "GET", "/api/products/out-of-stock", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), vec!["Phone"]);

    let (status, json) = send(&app, "GET", "/api/products/low-stock", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), vec!["Atlas", "Cable"]);

    let (status, json) = send(&app, "GET", "/api/products/low-stock?threshold=3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&json), vec!["Cable"]);
}

#[tokio::test]
async fn test_low_stock_uses_configured_threshold() {
    let config = Config {
        low_stock_threshold: 40,
        ..Config::default()
    };
    let app = setup_with_config(&config);
    seed_products(&app).await;

    let (_, json) = send(&app, "GET", "/api/products/low-stock", None).await;
    assert_eq!(names(&json), vec!["Atlas", "Cable", "Novel"]);
}

#[tokio::test]
async fn test_customer_lifecycle() {
    let app = setup();

    let (status, created) = send(
        &app,
        "POST",
        "/api/customers",
        Some(json!({
            "name": "Jane Doe",
            "email": "Jane@Example.com",
            "address": "1 Main St",
            "password": "hunter22",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["email"], "jane@example.com");
    assert!(created.get("password").is_none());

    let uri = format!("/api/customers/{}", created["id"].as_str().unwrap());
    let (status, json) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Jane Doe");

    let (status, json) = send(&app, "PUT", &uri, Some(json!({ "address": "2 Side St" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Jane Doe");
    assert_eq!(json["address"], "2 Side St");

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Customer not found");
}

#[tokio::test]
async fn test_customer_validation_and_duplicates() {
    let app = setup();
    let customer = |email: &str, password: &str| {
        json!({ "name": "Jane", "email": email, "address": "", "password": password })
    };

    let (status, json) = send(
        &app,
        "POST",
        "/api/customers",
        Some(customer("jane-at-example", "hunter22")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid email address");

    let (status, json) = send(
        &app,
        "POST",
        "/api/customers",
        Some(customer("jane@example.com", "123")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Password must be at least 6 characters long");

    let (status, _) = send(
        &app,
        "POST",
        "/api/customers",
        Some(customer("jane@example.com", "hunter22")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(
        &app,
        "POST",
        "/api/customers",
        Some(customer("JANE@example.com", "hunter22")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "Customer with this email already exists");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup();
    create_product(&app, product_body("Lamp", "SKU-9", "home", 100, 1)).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("products_created_total"));
}

fn write_log(dir: &Path, file: &str, lines: &[Value]) {
    let content: Vec<String> = lines.iter().map(Value::to_string).collect();
    std::fs::write(dir.join(file), content.join("\n") + "\n").unwrap();
}

fn log_config(dir: &Path) -> Config {
    Config {
        log_dir: dir.to_path_buf(),
        service_name: "shop".into(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_logs_requires_valid_date() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_with_config(&log_config(dir.path()));

    let (status, json) = send(&app, "GET", "/logs", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Missing required query parameter: date");

    let (status, json) = send(&app, "GET", "/logs?date=yesterday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["message"],
        "Invalid date format. Use YYYY-MM-DD or ISO datetime."
    );
}

#[tokio::test]
async fn test_logs_reads_and_filters_entries() {
    let dir = tempfile::tempdir().unwrap();
    let error = json!({"timestamp": "2025-08-31T10:00:03Z", "level": "ERROR", "message": "boom"});
    write_log(
        dir.path(),
        "shop.2025-08-31.log",
        &[
            json!({"timestamp": "2025-08-31T10:00:02Z", "level": "WARN", "message": "careful"}),
            json!({"timestamp": "2025-08-31T10:00:01Z", "level": "INFO", "message": "started"}),
            error.clone(),
        ],
    );
    write_log(
        dir.path(),
        "shop-error.2025-08-31.log",
        &[
            error,
            json!({"timestamp": "2025-08-31T09:00:00Z", "level": "ERROR", "message": "early"}),
        ],
    );
    let app = setup_with_config(&log_config(dir.path()));

    let (status, json) = send(&app, "GET", "/logs?date=2025-08-31T12:30", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["date"], "2025-08-31");
    assert_eq!(json["level"], Value::Null);
    assert_eq!(json["count"], 3);
    assert_eq!(json["logs"][0]["message"], "started");
    assert_eq!(json["logs"][2]["message"], "boom");

    let (_, json) = send(&app, "GET", "/logs?date=2025-08-31&level=ERROR", None).await;
    assert_eq!(json["level"], "error");
    assert_eq!(json["count"], 2);
    assert_eq!(json["logs"][0]["message"], "early");
    assert_eq!(json["logs"][1]["message"], "boom");

    let (_, json) = send(&app, "GET", "/logs?date=2025-08-31&level=warn", None).await;
    assert_eq!(json["count"], 1);

    let (_, json) = send(&app, "GET", "/logs?date=2025-08-31&level=verbose", None).await;
    assert_eq!(json["level"], Value::Null);
    assert_eq!(json["count"], 3);
}

#[tokio::test]
async fn test_logs_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_with_config(&log_config(dir.path()));

    let (status, json) = send(&app, "GET", "/logs?date=2020-01-01", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 0);
    assert_eq!(json["logs"], json!([]));
}
