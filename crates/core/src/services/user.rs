//! User service.

use std::collections::HashMap;

use reelvote_common::{AppError, AppResult, IdGenerator};
use reelvote_db::{
    entities::{dislike, like, movie, user},
    repositories::{MovieRepository, UserRepository, VoteRepository},
};
use sea_orm::Set;

/// A user together with their current votes, each joined to its movie.
#[derive(Debug, Clone)]
pub struct UserProfile {
    /// The user record.
    pub user: user::Model,
    /// Current likes, oldest first.
    pub likes: Vec<(like::Model, movie::Model)>,
    /// Current dislikes, oldest first.
    pub dislikes: Vec<(dislike::Model, movie::Model)>,
}

/// User service for registration and profile assembly.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    vote_repo: VoteRepository,
    movie_repo: MovieRepository,
    id_gen: IdGenerator,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        vote_repo: VoteRepository,
        movie_repo: MovieRepository,
    ) -> Self {
        Self {
            user_repo,
            vote_repo,
            movie_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a user under an external uuid.
    ///
    /// No uniqueness check: registering the same uuid twice creates a second
    /// row, matching the upstream contract.
    pub async fn register(&self, uuid: &str) -> AppResult<user::Model> {
        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            uuid: Set(uuid.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.user_repo.create(model).await
    }

    /// Fetch a user's profile with their votes joined to movies.
    pub async fn get_profile(&self, uuid: &str) -> AppResult<UserProfile> {
        let user = self
            .user_repo
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| AppError::UserNotRegistered(uuid.to_string()))?;

        let likes = self.vote_repo.find_likes_by_user(&user.id).await?;
        let dislikes = self.vote_repo.find_dislikes_by_user(&user.id).await?;

        let mut movie_ids: Vec<String> = likes
            .iter()
            .map(|l| l.movie_id.clone())
            .chain(dislikes.iter().map(|d| d.movie_id.clone()))
            .collect();
        movie_ids.sort_unstable();
        movie_ids.dedup();

        let movies = self.movie_repo.find_by_ids(&movie_ids).await?;
        let by_id: HashMap<String, movie::Model> =
            movies.into_iter().map(|m| (m.id.clone(), m)).collect();

        let likes = likes
            .into_iter()
            .filter_map(|l| by_id.get(&l.movie_id).cloned().map(|m| (l, m)))
            .collect();
        let dislikes = dislikes
            .into_iter()
            .filter_map(|d| by_id.get(&d.movie_id).cloned().map(|m| (d, m)))
            .collect();

        Ok(UserProfile {
            user,
            likes,
            dislikes,
        })
    }
}
