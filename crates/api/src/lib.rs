//! HTTP API server for the e-commerce backend.
//!
//! Provides REST endpoints for products and customers, a log query
//! endpoint, structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod container;
pub mod error;
pub mod logging;
pub mod presenters;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use container::Container;
use logging::LogFiles;

/// Shared application state accessible from all handlers.
#[derive(Clone)]
pub struct AppState {
    pub container: Arc<Container>,
    pub log_files: LogFiles,
    pub low_stock_threshold: u32,
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(container: Container, config: &Config, metrics: PrometheusHandle) -> Self {
        Self {
            container: Arc::new(container),
            log_files: LogFiles::from_config(config),
            low_stock_threshold: config.low_stock_threshold,
            metrics,
        }
    }
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: AppState) -> Router {
    use routes::{customers, products};

    let product_routes = Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/search", get(products::search_by_price))
        .route("/out-of-stock", get(products::out_of_stock))
        .route("/low-stock", get(products::low_stock))
        .route("/sku/{sku}", get(products::by_sku))
        .route(
            "/{id}",
            get(products::get)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/{id}/stock/increase", post(products::increase_stock))
        .route("/{id}/stock/decrease", post(products::decrease_stock));

    let customer_routes = Router::new()
        .route("/", post(customers::create))
        .route(
            "/{id}",
            get(customers::get)
                .put(customers::update)
                .delete(customers::delete),
        );

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/metrics", get(routes::metrics::get))
        .route("/logs", get(routes::logs::query))
        .nest("/api/products", product_routes)
        .nest("/api/customers", customer_routes)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
