//! Review handlers. Game id syntax is checked by the repository here, not
//! up front, so a malformed id on `create` surfaces as an invalid-id error
//! and on `list` as an empty list.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use catalog::{validate_new_review, Review};
use tracing::{debug, info, warn};

use crate::persistence::GameRepository;
use crate::service::extract::{GameId, JsonBody};
use crate::service::{ApiError, ApiResponse, CatalogService};

const MSG_CREATED: &str = "Reseña agregada exitosamente";

pub async fn create<R: GameRepository>(
    State(service): State<CatalogService<R>>,
    GameId(id): GameId,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<ApiResponse<Review>>), ApiError> {
    let review = match validate_new_review(&body) {
        Ok(review) => review,
        Err(err) => {
            debug!(game = %id, field = err.field, "Rejected review");
            return Err(ApiError::field(err, body));
        }
    };

    match service
        .repo
        .add_review(&id, review)
        .await
        .map_err(|e| service.fail(e))?
    {
        Some(review) => {
            info!(game = %id, review = %review.id, "Review added");
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::ok(review).with_message(MSG_CREATED)),
            ))
        }
        None => Err(ApiError::not_found()),
    }
}

pub async fn list<R: GameRepository>(
    State(service): State<CatalogService<R>>,
    GameId(id): GameId,
) -> Result<Json<ApiResponse<Vec<Review>>>, ApiError> {
    let reviews = service
        .repo
        .list_reviews(&id)
        .await
        .map_err(|e| service.fail(e))?;
    Ok(Json(ApiResponse::ok(reviews)))
}

pub async fn legacy_create<R: GameRepository>(
    state: State<CatalogService<R>>,
    path: GameId,
    body: JsonBody,
) -> Result<(StatusCode, Json<ApiResponse<Review>>), ApiError> {
    warn!("Deprecated review path used; switch to /reviews");
    create(state, path, body).await
}

pub async fn legacy_list<R: GameRepository>(
    state: State<CatalogService<R>>,
    path: GameId,
) -> Result<Json<ApiResponse<Vec<Review>>>, ApiError> {
    warn!("Deprecated review path used; switch to /reviews");
    list(state, path).await
}
