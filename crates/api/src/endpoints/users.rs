//! User endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use reelvote_common::AppResult;
use reelvote_core::UserProfile;
use reelvote_db::entities::user;
use serde::{Deserialize, Serialize};

use crate::endpoints::movies::MovieResponse;
use crate::state::AppState;

/// A single vote entry with its movie, as nested in the user payload.
#[derive(Debug, Serialize)]
pub struct VoteEntryResponse {
    pub id: String,
    pub movie: MovieResponse,
}

/// User response with nested votes.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub uuid: String,
    pub likes: Vec<VoteEntryResponse>,
    pub dislikes: Vec<VoteEntryResponse>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            uuid: user.uuid,
            likes: vec![],
            dislikes: vec![],
        }
    }
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.user.id,
            uuid: profile.user.uuid,
            likes: profile
                .likes
                .into_iter()
                .map(|(like, movie)| VoteEntryResponse {
                    id: like.id,
                    movie: movie.into(),
                })
                .collect(),
            dislikes: profile
                .dislikes
                .into_iter()
                .map(|(dislike, movie)| VoteEntryResponse {
                    id: dislike.id,
                    movie: movie.into(),
                })
                .collect(),
        }
    }
}

/// User envelope shared by both user endpoints.
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

/// Register user request.
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub uuid: String,
}

/// Register a user. No uniqueness check is performed on the uuid.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterUserRequest>,
) -> AppResult<Json<UserEnvelope>> {
    let user = state.user_service.register(&req.uuid).await?;

    Ok(Json(UserEnvelope { user: user.into() }))
}

/// Fetch a user's profile with their likes and dislikes.
async fn show(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> AppResult<Json<UserEnvelope>> {
    let profile = state.user_service.get_profile(&uuid).await?;

    Ok(Json(UserEnvelope {
        user: profile.into(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/users/{uuid}", get(show))
}
