//! HTTP front-end: routes inbound requests to an `ApodSource` and renders the result.

pub mod render;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::domain::ports::{ApodSource, Renderer};
use crate::utils::error::{ErrorCategory, ExplorerError, Result};
pub use render::{HtmlRenderer, JsonRenderer};

pub const NASA_APIS_URL: &str = "https://api.nasa.gov/";

#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn ApodSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn ApodSource>) -> Self {
        Self { source }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/nasaapis", get(nasa_apis))
        .route("/apod", get(apod_today))
        .route("/apod/", get(redirect_to_today))
        .route("/apod/{date}", get(apod_with_date))
        .route("/apod/{date}/", get(strip_trailing_slash))
        .route("/api/apod", get(api_today))
        .route("/api/apod/{date}", get(api_with_date))
        .with_state(state)
}

/// Serves the router until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let address = listener
        .local_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    tracing::info!("🌐 Listening on http://{}", address);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ExplorerError::ServerError {
            message: format!("server on {} stopped: {}", address, e),
        })
}

async fn nasa_apis() -> Redirect {
    Redirect::temporary(NASA_APIS_URL)
}

async fn redirect_to_today() -> Response {
    moved_permanently("/apod")
}

async fn strip_trailing_slash(Path(date): Path<String>) -> Response {
    moved_permanently(&format!("/apod/{}", urlencoding::encode(&date)))
}

async fn apod_today(State(state): State<AppState>, uri: Uri) -> Response {
    tracing::info!("Server route path: {}", uri.path());
    respond(&state, None, &HtmlRenderer).await
}

async fn apod_with_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
    uri: Uri,
) -> Response {
    tracing::info!("Route path: {}", uri.path());
    respond(&state, Some(&date), &HtmlRenderer).await
}

async fn api_today(State(state): State<AppState>) -> Response {
    respond(&state, None, &JsonRenderer).await
}

async fn api_with_date(State(state): State<AppState>, Path(date): Path<String>) -> Response {
    respond(&state, Some(&date), &JsonRenderer).await
}

async fn respond(state: &AppState, date: Option<&str>, renderer: &dyn Renderer) -> Response {
    let rendered = match state.source.fetch(date).await {
        Ok(retrieval) => renderer.render(&retrieval.record),
        Err(e) => Err(e),
    };

    match rendered {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, renderer.content_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            let status = status_for(&e);
            tracing::error!(
                "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            (
                status,
                [(header::CONTENT_TYPE, renderer.content_type())],
                renderer.render_error(status.as_u16(), &e.user_friendly_message()),
            )
                .into_response()
        }
    }
}

pub fn status_for(err: &ExplorerError) -> StatusCode {
    if err.is_timeout() {
        return StatusCode::GATEWAY_TIMEOUT;
    }
    match err.category() {
        ErrorCategory::Network | ErrorCategory::Upstream | ErrorCategory::Data => {
            StatusCode::BAD_GATEWAY
        }
        ErrorCategory::Configuration | ErrorCategory::System => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn moved_permanently(location: &str) -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}
