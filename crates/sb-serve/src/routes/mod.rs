pub mod applied_skills;
pub mod error;
pub mod health;
pub mod learnings;

use crate::middleware::auth::require_session;
use crate::middleware::correlation::{correlation_id, correlation_middleware};
use crate::{openapi, AppState};
use axum::body::Body;
use axum::http::Request;
use axum::{middleware, Router};
use axum::routing::any;
use sb_core::SkillBridgeError;
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    let mut api = Router::new()
        .merge(learnings::routes())
        .merge(applied_skills::scoped_routes());
    if state.capabilities.applied_mutations {
        api = api.merge(applied_skills::mutation_routes());
    }
    if state.auth.is_enforced() {
        api = api.route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));
    }

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            correlation_id = correlation_id(request).unwrap_or("-"),
            user = tracing::field::Empty,
        )
    });

    Router::new()
        .route("/", any(health::root))
        .merge(api)
        .merge(openapi::routes())
        .fallback(health::not_found)
        .with_state(state)
        .layer(trace)
        .layer(middleware::from_fn(correlation_middleware))
}

/// Decodes a JSON request body. An empty body reads as an object with no fields.
pub(crate) fn parse_body<T>(body: &[u8]) -> Result<T, SkillBridgeError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|err| SkillBridgeError::InvalidBody {
        message: err.to_string(),
    })
}
