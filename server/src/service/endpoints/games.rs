//! Game CRUD handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use catalog::{is_valid_object_id, validate_new_game, Game, GameFilter, GamePatch};
use serde::Deserialize;
use tracing::{debug, info};

use crate::persistence::GameRepository;
use crate::service::extract::{GameId, JsonBody, QueryParams};
use crate::service::{ApiError, ApiResponse, CatalogService};

const MSG_CREATED: &str = "Juego creado exitosamente";
const MSG_UPDATED: &str = "Juego actualizado exitosamente";
const MSG_DELETED: &str = "Juego eliminado exitosamente";

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    genero: Option<String>,
    plataforma: Option<String>,
}

fn checked_id(id: &str) -> Result<(), ApiError> {
    if is_valid_object_id(id) {
        Ok(())
    } else {
        debug!(%id, "Rejected malformed game id");
        Err(ApiError::invalid_id(id))
    }
}

pub async fn list<R: GameRepository>(
    State(service): State<CatalogService<R>>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<ApiResponse<Vec<Game>>>, ApiError> {
    let filter = GameFilter::new(query.genero, query.plataforma);
    let games = service.repo.list(&filter).await.map_err(|e| service.fail(e))?;
    debug!(count = games.len(), ?filter, "Listed games");
    Ok(Json(ApiResponse::ok(games)))
}

pub async fn create<R: GameRepository>(
    State(service): State<CatalogService<R>>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<ApiResponse<Game>>), ApiError> {
    let new_game = match validate_new_game(&body) {
        Ok(new_game) => new_game,
        Err(err) => {
            debug!(field = err.field, "Rejected game");
            return Err(ApiError::field(err, body));
        }
    };
    let game = service.repo.create(new_game).await.map_err(|e| service.fail(e))?;
    info!(id = %game.id, title = %game.title, "Game created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(game).with_message(MSG_CREATED)),
    ))
}

pub async fn get<R: GameRepository>(
    State(service): State<CatalogService<R>>,
    GameId(id): GameId,
) -> Result<Json<ApiResponse<Game>>, ApiError> {
    checked_id(&id)?;
    match service.repo.get(&id).await.map_err(|e| service.fail(e))? {
        Some(game) => Ok(Json(ApiResponse::ok(game))),
        None => Err(ApiError::not_found()),
    }
}

pub async fn update<R: GameRepository>(
    State(service): State<CatalogService<R>>,
    GameId(id): GameId,
    JsonBody(body): JsonBody,
) -> Result<Json<ApiResponse<Game>>, ApiError> {
    checked_id(&id)?;
    let patch = GamePatch::from_json(&body).map_err(|errors| {
        debug!(%id, count = errors.len(), "Rejected game update");
        ApiError::validation(errors.into_iter().map(|e| e.message).collect())
    })?;

    match service.repo.update(&id, &patch).await.map_err(|e| service.fail(e))? {
        Some(game) => {
            info!(%id, "Game updated");
            Ok(Json(ApiResponse::ok(game).with_message(MSG_UPDATED)))
        }
        None => Err(ApiError::not_found()),
    }
}

pub async fn delete<R: GameRepository>(
    State(service): State<CatalogService<R>>,
    GameId(id): GameId,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    checked_id(&id)?;
    if service.repo.delete(&id).await.map_err(|e| service.fail(e))? {
        info!(%id, "Game deleted");
        Ok(Json(ApiResponse::done(MSG_DELETED)))
    } else {
        Err(ApiError::not_found())
    }
}
