//! Local development server: the rendered page plus the contact endpoint on one port.

use crate::core::contact::{ContactEndpoint, FunctionResponse, CONTACT_FORM_PATH};
use crate::core::render::{render_page, ViewState};
use crate::domain::model::{PortfolioData, Theme};
use crate::utils::error::Result;
use axum::body::{Body, Bytes};
use axum::extract::rejection::BytesRejection;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{any, get};
use axum::Router;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;

pub struct AppState {
    pub data: PortfolioData,
    /// `None` leaves the initial theme to the visitor's system setting.
    pub default_theme: Option<Theme>,
    pub endpoint: ContactEndpoint,
}

impl AppState {
    pub fn new(
        data: PortfolioData,
        default_theme: Option<Theme>,
        endpoint: ContactEndpoint,
    ) -> Self {
        Self {
            data,
            default_theme,
            endpoint,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    theme: Option<Theme>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        // Every method is routed so non-POST requests get the endpoint's own 405 body.
        .route(CONTACT_FORM_PATH, any(contact_form))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Serving portfolio on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn index(State(state): State<Arc<AppState>>, Query(query): Query<PageQuery>) -> Html<String> {
    let view = ViewState::from_preference(query.theme.or(state.default_theme));
    Html(render_page(&state.data, &view))
}

async fn health() -> &'static str {
    "ok"
}

async fn contact_form(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let response = match body {
        Ok(bytes) => {
            let body = String::from_utf8_lossy(&bytes);
            state.endpoint.handle(method.as_str(), Some(body.as_ref())).await
        }
        // An unreadable body (over the size limit, aborted upload) is handled as an
        // absent one: 405 for other methods, the generic 500 for POST.
        Err(rejection) => {
            tracing::warn!(status = %rejection.status(), "Could not read contact form body: {}", rejection);
            state.endpoint.handle(method.as_str(), None).await
        }
    };
    into_http_response(response)
}

fn into_http_response(response: FunctionResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut builder = Response::builder().status(status);
    for (name, value) in &response.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    builder
        .body(Body::from(response.body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
