use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::TriviaError;

/// JSON body that must be an object; any rejection becomes `BadRequest`.
///
/// A bare `Json<T>` would also accept arrays for struct types, so the body
/// is read as a `Value` first and its shape checked before deserializing.
pub struct JsonObject<T>(pub T);

impl<S, T> FromRequest<S> for JsonObject<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = TriviaError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| TriviaError::BadRequest(rejection.body_text()))?;

        if !body.is_object() {
            return Err(TriviaError::BadRequest(
                "request body must be a JSON object".to_string(),
            ));
        }

        serde_json::from_value(body)
            .map(JsonObject)
            .map_err(|e| TriviaError::BadRequest(e.to_string()))
    }
}

/// Path segment that identifies a resource; an unparsable one names nothing.
pub struct ResourcePath<T>(pub T);

impl<S, T> FromRequestParts<S> for ResourcePath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = TriviaError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| TriviaError::NotFound(rejection.body_text()))?;
        Ok(ResourcePath(value))
    }
}

/// Query string; a malformed one is `BadRequest`.
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = TriviaError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| TriviaError::BadRequest(rejection.body_text()))?;
        Ok(QueryParams(value))
    }
}
