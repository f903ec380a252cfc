use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use barcut_core::{
    optimize_orders, render_report, OptimizationReport, Optimizer, OptimizerError, Order,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting profile cutting optimizer API");

    let addr = std::env::var("BARCUT_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("Try: curl http://{}/api/health", addr);

    axum::serve(listener, app()).await?;
    Ok(())
}

fn app() -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/optimize", post(optimize))
        .route("/api/optimize/batch", post(optimize_batch))
        .route("/api/report", post(report))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "barcut-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Cutting plan for a single order
async fn optimize(Json(order): Json<Order>) -> Result<Json<OptimizationReport>, AppError> {
    info!(
        "Received order with {} product lines",
        order.products.as_ref().map_or(0, Vec::len)
    );

    let result = Optimizer::new(order).optimize()?;
    log_report(&result);

    Ok(Json(result))
}

/// Cutting plans for several orders, concatenated into one report
async fn optimize_batch(
    Json(orders): Json<Vec<Order>>,
) -> Result<Json<OptimizationReport>, AppError> {
    info!("Received batch of {} orders", orders.len());

    let result = optimize_orders(&orders)?;
    log_report(&result);

    Ok(Json(result))
}

/// Plain text rendering of a previously computed report
async fn report(Json(report): Json<OptimizationReport>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_report(&report),
    )
        .into_response()
}

fn log_report(report: &OptimizationReport) {
    info!(
        "Optimization complete: {} profiles, {} bars, {:.2}% waste",
        report.summary.total_profiles, report.summary.total_bars, report.summary.waste_percentage
    );
}

/// Application error type
struct AppError(anyhow::Error);

impl From<OptimizerError> for AppError {
    fn from(err: OptimizerError) -> Self {
        AppError(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request error: {}", self.0);

        let status = match self.0.downcast_ref::<OptimizerError>() {
            Some(OptimizerError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
