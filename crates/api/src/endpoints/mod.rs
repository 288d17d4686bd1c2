//! API endpoints.

pub mod movies;
mod users;

use axum::Router;

use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new().merge(movies::router()).merge(users::router())
}
