pub mod error;
mod state;

use std::net::SocketAddr;

use avengers_api_types::Activity;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::debug;

use self::error::ApiError;
use crate::character_store::CharacterStoreHandle;
use crate::extension::MessagingExtension;
use crate::web_metrics::{record_invoke, track_metrics};

pub(crate) use state::WebState;

/// Bot framework messaging endpoint. Only invoke activities get a body back.
async fn messages(
    State(extension): State<MessagingExtension>,
    activity: Result<Json<Activity>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(activity) = activity?;
    if !activity.is_invoke() {
        debug!("ignoring {} activity", activity.activity_type);
        return Ok(StatusCode::OK.into_response());
    }
    let name = activity.name.unwrap_or_default();
    debug!("handling invoke {name}");
    let result = extension
        .handle_invoke(&name, activity.value.unwrap_or_default())
        .await;
    record_invoke(&name, result.is_ok());
    Ok(Json(result?).into_response())
}

async fn healthz(State(store): State<CharacterStoreHandle>) -> Result<&'static str, ApiError> {
    store.get().await?;
    Ok("ok")
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

pub(crate) fn router(state: WebState) -> Router {
    Router::new()
        .route("/api/messages", post(messages))
        .route("/healthz", get(healthz))
        .fallback(fallback)
        .layer(middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub(crate) async fn start_web(state: WebState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(state);
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
