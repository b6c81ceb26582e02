use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use receipt_core::domain::error::ValidationError;
use receipt_core::domain::receipt::Receipt;
use receipt_core::identity::{identify, ReceiptId};
use receipt_core::scoring;
use receipt_core::storage::{InMemoryReceiptStore, ReceiptStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = receipt_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let state = AppState {
        store: Arc::new(InMemoryReceiptStore::new()),
    };
    let app = router(state);

    let addr = settings.bind_addr();
    tracing::info!(%addr, "api listening");

    if let Err(e) = serve(addr, app).await {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(error = %e, "api server failed");
        return Err(e);
    }

    Ok(())
}

async fn serve(addr: std::net::SocketAddr, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    store: Arc<dyn ReceiptStore>,
}

#[derive(Debug, Serialize)]
struct ProcessResponse {
    id: ReceiptId,
}

#[derive(Debug, Serialize)]
struct PointsResponse {
    points: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
enum ApiError {
    MalformedBody,
    Invalid(ValidationError),
    NotFound,
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Invalid(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::MalformedBody => (
                StatusCode::BAD_REQUEST,
                "Request body must be valid JSON.".to_string(),
            ),
            Self::Invalid(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                "No receipt found for this ID.".to_string(),
            ),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

async fn process_receipt(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProcessResponse>, ApiError> {
    // Parsed by hand so a missing or odd content-type still gets a JSON error body.
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "rejected receipt: body is not JSON");
        ApiError::MalformedBody
    })?;

    let receipt = Receipt::from_json(&body).map_err(|e| {
        tracing::debug!(reason = ?e, "rejected receipt");
        ApiError::from(e)
    })?;

    let id = identify(&receipt);
    let breakdown = scoring::breakdown(&receipt);
    let points = breakdown.total();
    tracing::debug!(%id, ?breakdown, "scored receipt");

    let inserted = state.store.insert_if_absent(id.clone(), points).await;
    tracing::info!(%id, points, inserted, "processed receipt");

    Ok(Json(ProcessResponse { id }))
}

async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ApiError> {
    let Some(points) = state.store.get(&id).await else {
        tracing::debug!(%id, "no receipt for id");
        return Err(ApiError::NotFound);
    };
    Ok(Json(PointsResponse { points }))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &receipt_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
