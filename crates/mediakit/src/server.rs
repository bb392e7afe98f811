//! HTTP surface of the gateway
//!
//! One POST route per [`Endpoint`]. Successful requests answer
//! `{"success": true, "data": <MediaRecord>}`; failures answer
//! `{"error": "..."}` with the status from [`GatewayError::status_code`].

use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::types::{ApiResponse, Endpoint, MediaRecord, MediaRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

type HandlerResult = Result<Json<ApiResponse<MediaRecord>>, GatewayError>;

/// Build the router with every gateway endpoint plus `/health`
pub fn router(gateway: Arc<Gateway>) -> Router {
    Router::new()
        .route(Endpoint::Youtube.route(), post(youtube_download))
        .route(Endpoint::Tiktok.route(), post(tiktok_download))
        .route(Endpoint::Twitter.route(), post(twitter_download))
        .route(Endpoint::Universal.route(), post(all_media_download))
        .route("/health", get(health))
        .with_state(gateway)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        // method + path only; bodies carry caller URLs
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

/// Serve the router on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, gateway: Arc<Gateway>, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn youtube_download(
    State(gateway): State<Arc<Gateway>>,
    payload: Result<Json<MediaRequest>, JsonRejection>,
) -> HandlerResult {
    dispatch(&gateway, Endpoint::Youtube, payload).await
}

async fn tiktok_download(
    State(gateway): State<Arc<Gateway>>,
    payload: Result<Json<MediaRequest>, JsonRejection>,
) -> HandlerResult {
    dispatch(&gateway, Endpoint::Tiktok, payload).await
}

async fn twitter_download(
    State(gateway): State<Arc<Gateway>>,
    payload: Result<Json<MediaRequest>, JsonRejection>,
) -> HandlerResult {
    dispatch(&gateway, Endpoint::Twitter, payload).await
}

async fn all_media_download(
    State(gateway): State<Arc<Gateway>>,
    payload: Result<Json<MediaRequest>, JsonRejection>,
) -> HandlerResult {
    dispatch(&gateway, Endpoint::Universal, payload).await
}

async fn dispatch(
    gateway: &Gateway,
    endpoint: Endpoint,
    payload: Result<Json<MediaRequest>, JsonRejection>,
) -> HandlerResult {
    let Json(request) = payload
        .map_err(|rejection| GatewayError::Validation(format!("Invalid request body: {}", rejection.body_text())))?;

    let record = gateway.handle(endpoint, request).await?;
    Ok(Json(ApiResponse::ok(record)))
}

async fn health(State(gateway): State<Arc<Gateway>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "mode": gateway.config().mode.as_str(),
        "upstream": gateway.upstream_enabled(),
    }))
}
