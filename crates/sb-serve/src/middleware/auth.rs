use crate::routes::error::map_error;
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use sb_core::error::AuthError;
use sb_core::SkillBridgeError;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    Disabled,
    /// The hosting platform resolves the session and forwards the user id in a header.
    ForwardedHeader,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub mode: AuthMode,
    pub user_header: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            mode: AuthMode::ForwardedHeader,
            user_header: "x-user-id".to_string(),
        }
    }
}

impl AuthSettings {
    pub fn disabled() -> Self {
        Self {
            mode: AuthMode::Disabled,
            ..Self::default()
        }
    }

    pub fn is_enforced(&self) -> bool {
        self.mode == AuthMode::ForwardedHeader
    }
}

/// The platform user a request was made on behalf of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let user = request
        .headers()
        .get(state.auth.user_header.as_str())
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    let Some(user) = user else {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "rejected request without a session"
        );
        return map_error(&SkillBridgeError::Auth(AuthError::MissingSession)).into_response();
    };

    tracing::Span::current().record("user", user.as_str());
    request.extensions_mut().insert(AuthenticatedUser(user));
    next.run(request).await
}
