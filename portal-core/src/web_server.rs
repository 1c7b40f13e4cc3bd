
use crate::traits::{ScanBackend, UiAssetProvider};
use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

// The shared state for our web server.
// By using `Arc<dyn Trait>`, we can inject any implementation
// that satisfies the trait bounds.
pub type WebServerState = State<Arc<AppState>>;

pub struct AppState {
    pub backend: Arc<dyn ScanBackend>,
    pub frontend: Arc<dyn UiAssetProvider>,
}

/// Builds the router: `/` (the page), `/scan` (JSON list) and static assets.
pub fn router(backend: Arc<dyn ScanBackend>, frontend: Arc<dyn UiAssetProvider>) -> Router {
    let app_state = Arc::new(AppState { backend, frontend });

    Router::new()
        .route("/", get(serve_index))
        .route("/scan", get(api_scan))
        .fallback(get(serve_static_asset))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Serves `app` on an already bound listener.
pub async fn serve(listener: TcpListener, app: Router) -> crate::Result<()> {
    axum::serve(listener, app.into_make_service())
        .await
        .map_err(|e| crate::Error::WebServer(e.into()))
}

/// Binds `addr` and runs the development server until it fails.
pub async fn run_server(
    addr: SocketAddr,
    backend: Arc<dyn ScanBackend>,
    frontend: Arc<dyn UiAssetProvider>,
) -> crate::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🌐 Web server listening on {}", listener.local_addr()?);
    serve(listener, router(backend, frontend)).await
}

// --- Route Handlers ---

/// Serves the main `index.html` file.
async fn serve_index(State(state): WebServerState) -> Response {
    asset_response(&state, "index.html").await
}

/// Serves a static asset (e.g., CSS) from the frontend provider.
async fn serve_static_asset(State(state): WebServerState, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };
    asset_response(&state, path).await
}

async fn asset_response(state: &AppState, path: &str) -> Response {
    match state.frontend.get_asset(path).await {
        Ok((data, mime)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime)],
            Body::from(data),
        )
            .into_response(),
        Err(e) => {
            tracing::debug!("{}", e);
            (StatusCode::NOT_FOUND, format!("Asset not found: {}", path)).into_response()
        }
    }
}

/// Returns the current scan list; `[]` while a scan is still running.
async fn api_scan(State(state): WebServerState) -> Response {
    match state.backend.scan().await {
        Ok(networks) => {
            tracing::debug!("Handling /scan: {} networks", networks.len());
            (StatusCode::OK, Json(networks)).into_response()
        }
        Err(e) => {
            tracing::warn!("Scan failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
