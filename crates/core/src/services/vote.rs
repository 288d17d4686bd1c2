//! Vote service.
//!
//! The vote engine: given a movie, a user, and a requested direction, decide
//! which persistence mutations apply and run them. The decision table lives in
//! [`VoteTransition::plan`], which is pure; the repository executes each
//! outcome as a single transaction.

use reelvote_common::{AppError, AppResult, IdGenerator};
use reelvote_db::{
    entities::{dislike, like, movie, user},
    repositories::{MovieRepository, UserRepository, VoteRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// Vote polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    /// Thumbs up.
    Up,
    /// Thumbs down.
    Down,
}

/// The mutation a vote request implies, given the user's current stance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteTransition {
    /// An existing like flips to a dislike.
    LikeToDislike(like::Model),
    /// An existing dislike flips to a like.
    DislikeToLike(dislike::Model),
    /// No opposite-direction vote exists: insert a new row and bump the tally.
    /// A same-direction vote is NOT detected here, so repeating a vote inserts
    /// a duplicate row and double-counts.
    Record(VoteDirection),
}

impl VoteTransition {
    /// Decide the transition for a vote, evaluated in rule order:
    /// an existing like + down flips it, an existing dislike + up flips it,
    /// anything else records a fresh vote.
    #[must_use]
    pub fn plan(
        existing_like: Option<like::Model>,
        existing_dislike: Option<dislike::Model>,
        direction: VoteDirection,
    ) -> Self {
        match (existing_like, existing_dislike, direction) {
            (Some(like), _, VoteDirection::Down) => Self::LikeToDislike(like),
            (_, Some(dislike), VoteDirection::Up) => Self::DislikeToLike(dislike),
            (_, _, direction) => Self::Record(direction),
        }
    }
}

/// Vote service for business logic.
#[derive(Clone)]
pub struct VoteService {
    vote_repo: VoteRepository,
    movie_repo: MovieRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl VoteService {
    /// Create a new vote service.
    #[must_use]
    pub const fn new(
        vote_repo: VoteRepository,
        movie_repo: MovieRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            vote_repo,
            movie_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Handle a vote on a movie identified by its external query ID.
    ///
    /// The user must already be registered. An unknown `query_id` creates the
    /// movie and records the vote as its first; a known one runs the
    /// transition engine against the existing record. Returns the movie with
    /// fresh tallies either way.
    pub async fn register_vote(
        &self,
        uuid: &str,
        query_id: &str,
        direction: VoteDirection,
        title: &str,
    ) -> AppResult<movie::Model> {
        let user = self
            .user_repo
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| AppError::UserNotFound(uuid.to_string()))?;

        match self.movie_repo.find_by_query_id(query_id).await? {
            Some(movie) => self.apply_vote(&movie, &user, direction).await,
            None => {
                self.create_movie_and_vote(title, query_id, &user, direction)
                    .await
            }
        }
    }

    /// Apply a vote to an existing movie.
    ///
    /// Missing movie/user preconditions are the caller's responsibility; the
    /// engine itself raises no precondition errors.
    pub async fn apply_vote(
        &self,
        movie: &movie::Model,
        user: &user::Model,
        direction: VoteDirection,
    ) -> AppResult<movie::Model> {
        let existing_like = self.vote_repo.find_like(&user.id, &movie.id).await?;
        let existing_dislike = self.vote_repo.find_dislike(&user.id, &movie.id).await?;

        match VoteTransition::plan(existing_like, existing_dislike, direction) {
            VoteTransition::LikeToDislike(like) => {
                let replacement = self.new_dislike(&user.id, &movie.id);
                self.vote_repo
                    .switch_like_to_dislike(like, replacement)
                    .await?;
            }
            VoteTransition::DislikeToLike(dislike) => {
                let replacement = self.new_like(&user.id, &movie.id);
                self.vote_repo
                    .switch_dislike_to_like(dislike, replacement)
                    .await?;
            }
            VoteTransition::Record(VoteDirection::Up) => {
                let model = self.new_like(&user.id, &movie.id);
                self.vote_repo.record_like(&movie.id, model).await?;
            }
            VoteTransition::Record(VoteDirection::Down) => {
                let model = self.new_dislike(&user.id, &movie.id);
                self.vote_repo.record_dislike(&movie.id, model).await?;
            }
        }

        self.movie_repo.get_by_id(&movie.id).await
    }

    /// Create a movie with zero tallies and record the first vote on it.
    ///
    /// The movie row, the vote row, and the tally bump land in one
    /// transaction; no opposite-vote check is needed since the movie is new.
    pub async fn create_movie_and_vote(
        &self,
        title: &str,
        query_id: &str,
        user: &user::Model,
        direction: VoteDirection,
    ) -> AppResult<movie::Model> {
        let movie_id = self.id_gen.generate();
        let movie = movie::ActiveModel {
            id: Set(movie_id.clone()),
            title: Set(title.to_string()),
            query_id: Set(query_id.to_string()),
            up_count: Set(0),
            down_count: Set(0),
            created_at: Set(chrono::Utc::now().into()),
        };

        match direction {
            VoteDirection::Up => {
                let vote = self.new_like(&user.id, &movie_id);
                self.vote_repo.create_movie_with_like(movie, vote).await?;
            }
            VoteDirection::Down => {
                let vote = self.new_dislike(&user.id, &movie_id);
                self.vote_repo
                    .create_movie_with_dislike(movie, vote)
                    .await?;
            }
        }

        self.movie_repo.get_by_id(&movie_id).await
    }

    fn new_like(&self, user_id: &str, movie_id: &str) -> like::ActiveModel {
        like::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            movie_id: Set(movie_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        }
    }

    fn new_dislike(&self, user_id: &str, movie_id: &str) -> dislike::ActiveModel {
        dislike::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            movie_id: Set(movie_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}
