//! HTTP surface of the catalog.
//!
//! - `endpoints`: handlers grouped by resource
//! - `response`: the JSON envelope and error classification
//! - `extract`: request body extraction with enveloped rejections

mod endpoints;
mod extract;
mod response;


use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, Uri};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::persistence::{GameRepository, PersistenceError};
use endpoints::{games, health, reviews};

pub use response::{ApiError, ApiResponse};

pub const HEALTH_PATH: &str = "/health";
pub const GAMES_PATH: &str = "/api/juegos";
pub const GAME_PATH: &str = "/api/juegos/{id}";
pub const REVIEWS_PATH: &str = "/api/juegos/{id}/reviews";
/// Deprecated alias of [`REVIEWS_PATH`]. Request targets are ASCII on the
/// wire, so `reseñas` only ever arrives percent-encoded.
pub const LEGACY_REVIEWS_PATH: &str = "/api/juegos/{id}/rese%C3%B1as";

pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// State shared by every handler.
pub struct CatalogService<R> {
    repo: Arc<R>,
    dev_mode: bool,
}

impl<R> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            dev_mode: self.dev_mode,
        }
    }
}

impl<R> CatalogService<R> {
    pub fn new(repo: Arc<R>, dev_mode: bool) -> Self {
        Self { repo, dev_mode }
    }

    fn fail(&self, err: PersistenceError) -> ApiError {
        ApiError::from_persistence(err, self.dev_mode)
    }
}

/// Settings for the outer HTTP layers.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub allowed_origin: HeaderValue,
    pub dev_mode: bool,
}

/// Build the full application router over `repo`.
pub fn router<R>(repo: Arc<R>, settings: HttpSettings) -> Router
where
    R: GameRepository + 'static,
{
    let service = CatalogService::new(repo, settings.dev_mode);

    let cors = CorsLayer::new()
        .allow_origin(settings.allowed_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        .route(HEALTH_PATH, get(health::health))
        .route(GAMES_PATH, get(games::list::<R>).post(games::create::<R>))
        .route(
            GAME_PATH,
            get(games::get::<R>)
                .put(games::update::<R>)
                .delete(games::delete::<R>),
        )
        .route(
            REVIEWS_PATH,
            get(reviews::list::<R>).post(reviews::create::<R>),
        )
        .route(
            LEGACY_REVIEWS_PATH,
            get(reviews::legacy_list::<R>).post(reviews::legacy_create::<R>),
        )
        .fallback(not_found)
        .with_state(service)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "No route");
    ApiError::route_not_found(uri.path())
}
