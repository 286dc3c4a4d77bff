use axum::{
    extract::Request,
    http::{Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::TriviaError;

/// Let only real CORS preflights through to the CORS layer.
///
/// `CorsLayer` answers every `OPTIONS` with an empty 200. An `OPTIONS`
/// without `Access-Control-Request-Method` is not a preflight and gets the
/// regular 405 payload instead.
pub async fn reject_bare_options(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS
        && !req
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
    {
        debug!(path = %req.uri().path(), "OPTIONS without preflight headers");
        return TriviaError::MethodNotAllowed.into_response();
    }
    next.run(req).await
}
