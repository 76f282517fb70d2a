//! CleanCart - Backend stub for the storefront
//!
//! Serves the product catalog and a simulated checkout behind the HTTP
//! contract the cart core consumes. Order processing and payment are faked:
//! checkout waits a moment and confirms.

use anyhow::Result;
use axum::{extract::{Path, State}, http::StatusCode, routing::{get, post}, Json, Router};
use chrono::Utc;
use cleancart::{summarize, Cart, InMemoryCatalog, LineItem, Money, ProductCatalog};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<InMemoryCatalog>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    let state = AppState { catalog: Arc::new(InMemoryCatalog::with_demo_products()) };

    let app = Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "cleancart"})) }))
        .route("/api/v1/products", get(list_products))
        .route("/api/v1/products/:id", get(get_product))
        .route("/api/v1/checkout", post(checkout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "8083".to_string());
    tracing::info!("CleanCart backend stub listening on 0.0.0.0:{}", port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?, app).await?;
    Ok(())
}

async fn list_products(State(s): State<AppState>) -> Json<Vec<cleancart::Product>> {
    Json(s.catalog.all())
}

async fn get_product(State(s): State<AppState>, Path(id): Path<String>) -> Result<Json<cleancart::Product>, (StatusCode, String)> {
    s.catalog.find_by_id(&id).map(Json).ok_or((StatusCode::NOT_FOUND, "Not found".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<LineItem>,
    pub payment_method: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub status: String,
    pub order_id: Uuid,
    pub payment_method: String,
    pub total: Money,
    pub confirmed_at: chrono::DateTime<Utc>,
}

/// Simulated payment: an artificial wait, then success. The client clears its
/// cart on confirmation; on failure the cart is left unchanged.
async fn checkout(State(_s): State<AppState>, Json(r): Json<CheckoutRequest>) -> Result<Json<CheckoutResponse>, (StatusCode, String)> {
    if r.items.is_empty() {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, "Cart is empty".to_string()));
    }
    let summary = summarize(&Cart::from_items(r.items), None);
    tokio::time::sleep(Duration::from_millis(400)).await;
    Ok(Json(CheckoutResponse {
        status: "confirmed".to_string(),
        order_id: Uuid::now_v7(),
        payment_method: r.payment_method,
        total: summary.total,
        confirmed_at: Utc::now(),
    }))
}
