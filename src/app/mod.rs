//! 应用层：状态、路由组装

pub mod producto;

use std::time::Duration;

use axum::{middleware, response::Json, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::core::middleware::request_logging_middleware;
use crate::infrastructure::config::HttpConfig;
use producto::ProductoService;

#[derive(Clone)]
pub struct AppState {
    pub producto_service: ProductoService,
}

impl AppState {
    pub fn new(producto_service: ProductoService) -> Self {
        Self { producto_service }
    }
}

/// 组装完整的应用路由及中间件
pub fn router(state: AppState, http: &HttpConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(producto::handler::routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(TimeoutLayer::new(Duration::from_secs(http.timeout_seconds)))
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
