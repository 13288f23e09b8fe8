use axum::Json;

use crate::service::ApiResponse;

const MSG_HEALTHY: &str = "API del catálogo de juegos funcionando";

/// Liveness probe. Does not touch the database.
pub async fn health() -> Json<ApiResponse<()>> {
    Json(ApiResponse::done(MSG_HEALTHY))
}
