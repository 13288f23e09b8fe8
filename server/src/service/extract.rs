//! Extractors whose rejections keep axum's status but use the API envelope.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::response::ApiError;

const MSG_BAD_BODY: &str = "Cuerpo de la petición inválido";
const MSG_BAD_PATH: &str = "Parámetro de ruta inválido";
const MSG_BAD_QUERY: &str = "Parámetros de consulta inválidos";

/// A JSON request body. Rejections cover malformed JSON, a wrong content
/// type and bodies over the size limit.
#[derive(Debug)]
pub struct JsonBody(pub Value);

impl<S: Send + Sync> FromRequest<S> for JsonBody {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(status = %rejection.status(), "Rejected request body");
                Err(ApiError::new(rejection.status(), MSG_BAD_BODY)
                    .with_error(rejection.body_text()))
            }
        }
    }
}

/// The `{id}` path segment, percent-decoded. Syntax is not checked here.
#[derive(Debug)]
pub struct GameId(pub String);

impl<S: Send + Sync> FromRequestParts<S> for GameId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                tracing::debug!(status = %rejection.status(), "Rejected path parameter");
                Err(ApiError::new(rejection.status(), MSG_BAD_PATH)
                    .with_error(rejection.body_text()))
            }
        }
    }
}

/// Query string parameters deserialized into `T`.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(status = %rejection.status(), "Rejected query string");
                Err(ApiError::new(rejection.status(), MSG_BAD_QUERY)
                    .with_error(rejection.body_text()))
            }
        }
    }
}
