pub mod middleware;
pub mod openapi;
pub mod routes;

use axum::Router;
use middleware::auth::{AuthSettings, AuthenticatedUser};
use sb_core::{Capabilities, SkillBridge, SkillBridgeError};
use sb_db::schema;
use sb_db::store::DbStore;
use sb_db::util::store_error;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct AppState {
    pub db_path: String,
    pub capabilities: Capabilities,
    pub auth: AuthSettings,
}

/// Opens a fresh connection for the current request. Tables are created at
/// startup, not here, so an unprovisioned database surfaces as a store error.
///
/// With a session user the store only sees that user's rows; without one
/// (auth disabled) rows are shared.
pub fn build_skillbridge(
    state: &AppState,
    user: Option<&AuthenticatedUser>,
) -> Result<SkillBridge<DbStore>, SkillBridgeError> {
    let conn = schema::open(&state.db_path)
        .map_err(|err| SkillBridgeError::store("open data store")(store_error(err)))?;
    let store = match user {
        Some(AuthenticatedUser(id)) => DbStore::scoped_to(conn, id.as_str()),
        None => DbStore::new(conn),
    };
    Ok(SkillBridge::new(store, state.capabilities))
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "skillbridge listening");
    axum::serve(listener, app(state)).await
}
