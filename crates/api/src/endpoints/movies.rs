//! Movie endpoints.

use axum::{Json, Router, extract::State, routing::post};
use reelvote_common::AppResult;
use reelvote_core::VoteDirection;
use reelvote_db::entities::movie;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Movie response.
///
/// Field names are the wire contract; they stay snake_case.
#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: String,
    pub title: String,
    pub query_id: String,
    pub up_count: i32,
    pub down_count: i32,
}

impl From<movie::Model> for MovieResponse {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            query_id: m.query_id,
            up_count: m.up_count,
            down_count: m.down_count,
        }
    }
}

/// Register vote request.
#[derive(Debug, Deserialize)]
pub struct RegisterVoteRequest {
    pub uuid: String,
    pub query_id: String,
    pub thumbs: VoteDirection,
    pub title: String,
}

/// Register vote response.
#[derive(Debug, Serialize)]
pub struct RegisterVoteResponse {
    pub movie: MovieResponse,
    pub code: u16,
}

/// Record a vote on a movie, creating the movie on first sight.
async fn vote(
    State(state): State<AppState>,
    Json(req): Json<RegisterVoteRequest>,
) -> AppResult<Json<RegisterVoteResponse>> {
    let movie = state
        .vote_service
        .register_vote(&req.uuid, &req.query_id, req.thumbs, &req.title)
        .await?;

    Ok(Json(RegisterVoteResponse {
        movie: movie.into(),
        code: 200,
    }))
}

/// Bulk movie lookup request.
#[derive(Debug, Deserialize)]
pub struct MoviesCheckRequest {
    /// Accepted for wire compatibility; the lookup does not use it.
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub queries: Vec<String>,
}

/// Bulk movie lookup response.
#[derive(Debug, Serialize)]
pub struct MoviesCheckResponse {
    pub movies: Vec<MovieResponse>,
}

/// Resolve a batch of query IDs to known movies, skipping unknown ones.
async fn check(
    State(state): State<AppState>,
    Json(req): Json<MoviesCheckRequest>,
) -> AppResult<Json<MoviesCheckResponse>> {
    let movies = state.movie_service.lookup(&req.queries).await?;

    Ok(Json(MoviesCheckResponse {
        movies: movies.into_iter().map(Into::into).collect(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies", post(vote))
        .route("/movies_check", post(check))
}
