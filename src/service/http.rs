//! HTTP transport for the movie info service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /v1/movieinfos`: validate and create. 201 with the stored record.
//! - `GET /v1/movieinfos`: every record as a JSON array.
//! - `GET /v1/movieinfos/:id`: the record, or 200 with an empty body.
//! - `PUT /v1/movieinfos/:id`: replace all fields but the id. 404 if missing.
//! - `DELETE /v1/movieinfos/:id`: 204 whether or not the record existed.
//! - `GET /health`: `{ "ok": true, "records": N }`.
//!
//! Validation failures answer 400 with the translated messages as a plain
//! text body; store failures answer 500.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use movies_info_service::{http, InMemoryStore, MovieInfoService};
//!
//! let service = Arc::new(MovieInfoService::new(InMemoryStore::new()));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(service.clone());
//!
//! // Or serve directly
//! http::serve(service, "0.0.0.0:8080").await?;
//! ```

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use futures::TryStreamExt;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use super::error::ServiceError;
use super::movie_info_service::MovieInfoService;
use crate::movie_info::MovieInfo;
use crate::store::RecordStore;

/// Base path of the movie info resource.
pub const MOVIE_INFOS_PATH: &str = "/v1/movieinfos";

type SharedService<S> = Arc<MovieInfoService<S>>;

/// Build an axum `Router` serving the movie info endpoints.
pub fn router<S: RecordStore>(service: SharedService<S>) -> Router {
    Router::new()
        .route("/health", get(health_handler::<S>))
        .route(
            MOVIE_INFOS_PATH,
            get(get_all_handler::<S>).post(add_handler::<S>),
        )
        .route(
            &format!("{MOVIE_INFOS_PATH}/:id"),
            get(get_by_id_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve over HTTP at the given address (e.g. `"0.0.0.0:8080"`) until Ctrl-C.
pub async fn serve<S: RecordStore>(
    service: SharedService<S>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "movie info service listening");
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = self.to_string();
        if status.is_server_error() {
            error!(%status, error = %body, "request failed");
        } else {
            warn!(%status, error = %body, "request rejected");
        }
        (status, body).into_response()
    }
}

/// Malformed bodies are a client error regardless of which decode step failed.
fn rejection_response(rejection: JsonRejection) -> Response {
    let body = rejection.body_text();
    warn!(error = %body, "request body rejected");
    (StatusCode::BAD_REQUEST, body).into_response()
}

/// `GET /health`: returns `{ "ok": true, "records": N }`.
async fn health_handler<S: RecordStore>(
    State(service): State<SharedService<S>>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let records = service.count().await?;
    Ok(Json(json!({ "ok": true, "records": records })))
}

/// `POST /v1/movieinfos`
async fn add_handler<S: RecordStore>(
    State(service): State<SharedService<S>>,
    payload: Result<Json<MovieInfo>, JsonRejection>,
) -> Response {
    let Json(movie) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.add_movie_info(movie).await {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `GET /v1/movieinfos`
async fn get_all_handler<S: RecordStore>(
    State(service): State<SharedService<S>>,
) -> Result<Json<Vec<MovieInfo>>, ServiceError> {
    let movies: Vec<MovieInfo> = service
        .get_all()
        .await?
        .try_collect()
        .await?;
    Ok(Json(movies))
}

/// `GET /v1/movieinfos/:id`: a missing record is 200 with an empty body.
async fn get_by_id_handler<S: RecordStore>(
    State(service): State<SharedService<S>>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    Ok(match service.get_movie_info_by_id(&id).await? {
        Some(movie) => Json(movie).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

/// `PUT /v1/movieinfos/:id`
async fn update_handler<S: RecordStore>(
    State(service): State<SharedService<S>>,
    Path(id): Path<String>,
    payload: Result<Json<MovieInfo>, JsonRejection>,
) -> Response {
    let Json(patch) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.update_movie_info(&id, patch).await {
        Ok(updated) => Json(updated).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `DELETE /v1/movieinfos/:id`
async fn delete_handler<S: RecordStore>(
    State(service): State<SharedService<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    service.delete_movie_info(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
