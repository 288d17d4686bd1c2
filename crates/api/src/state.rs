//! Application state.

use reelvote_core::{MovieService, UserService, VoteService};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Vote transition engine.
    pub vote_service: VoteService,
    /// Movie lookup.
    pub movie_service: MovieService,
    /// User registration and profiles.
    pub user_service: UserService,
}
