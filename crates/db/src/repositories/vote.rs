//! Vote repository.
//!
//! Owns the like/dislike rows and the denormalized movie tallies. Every
//! mutation that touches a vote row and a tally together runs in a single
//! transaction so the tally invariant cannot be observed half-applied.

use std::sync::Arc;

use crate::entities::{Dislike, Like, Movie, dislike, like, movie};
use reelvote_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, TransactionTrait, sea_query::Expr,
};

/// Vote repository for database operations.
#[derive(Clone)]
pub struct VoteRepository {
    db: Arc<DatabaseConnection>,
}

impl VoteRepository {
    /// Create a new vote repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // ==================== Reads ====================

    /// Find a like by user and movie.
    pub async fn find_like(
        &self,
        user_id: &str,
        movie_id: &str,
    ) -> AppResult<Option<like::Model>> {
        Like::find()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::MovieId.eq(movie_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a dislike by user and movie.
    pub async fn find_dislike(
        &self,
        user_id: &str,
        movie_id: &str,
    ) -> AppResult<Option<dislike::Model>> {
        Dislike::find()
            .filter(dislike::Column::UserId.eq(user_id))
            .filter(dislike::Column::MovieId.eq(movie_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user's likes (oldest first).
    pub async fn find_likes_by_user(&self, user_id: &str) -> AppResult<Vec<like::Model>> {
        Like::find()
            .filter(like::Column::UserId.eq(user_id))
            .order_by_asc(like::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user's dislikes (oldest first).
    pub async fn find_dislikes_by_user(&self, user_id: &str) -> AppResult<Vec<dislike::Model>> {
        Dislike::find()
            .filter(dislike::Column::UserId.eq(user_id))
            .order_by_asc(dislike::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ==================== Transactional mutations ====================

    /// Insert a like and increment the movie's up tally.
    pub async fn record_like(
        &self,
        movie_id: &str,
        model: like::ActiveModel,
    ) -> AppResult<like::Model> {
        let txn = self.begin().await?;

        let created = model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Self::increment_up_count(&txn, movie_id).await?;

        Self::commit(txn).await?;
        Ok(created)
    }

    /// Insert a dislike and increment the movie's down tally.
    pub async fn record_dislike(
        &self,
        movie_id: &str,
        model: dislike::ActiveModel,
    ) -> AppResult<dislike::Model> {
        let txn = self.begin().await?;

        let created = model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Self::increment_down_count(&txn, movie_id).await?;

        Self::commit(txn).await?;
        Ok(created)
    }

    /// Create a movie with zero tallies and its first like in one transaction.
    pub async fn create_movie_with_like(
        &self,
        movie: movie::ActiveModel,
        vote: like::ActiveModel,
    ) -> AppResult<movie::Model> {
        let txn = self.begin().await?;

        let created = movie
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        vote.insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Self::increment_up_count(&txn, &created.id).await?;

        Self::commit(txn).await?;
        Ok(created)
    }

    /// Create a movie with zero tallies and its first dislike in one transaction.
    pub async fn create_movie_with_dislike(
        &self,
        movie: movie::ActiveModel,
        vote: dislike::ActiveModel,
    ) -> AppResult<movie::Model> {
        let txn = self.begin().await?;

        let created = movie
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        vote.insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Self::increment_down_count(&txn, &created.id).await?;

        Self::commit(txn).await?;
        Ok(created)
    }

    /// Replace an existing like with a dislike, adjusting both tallies.
    ///
    /// Step order matches the transition rule: delete the like, decrement
    /// the up tally (floored at 0), insert the dislike, increment the down
    /// tally.
    pub async fn switch_like_to_dislike(
        &self,
        existing: like::Model,
        replacement: dislike::ActiveModel,
    ) -> AppResult<dislike::Model> {
        let movie_id = existing.movie_id.clone();
        let txn = self.begin().await?;

        existing
            .delete(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Self::decrement_up_count(&txn, &movie_id).await?;
        let created = replacement
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Self::increment_down_count(&txn, &movie_id).await?;

        Self::commit(txn).await?;
        Ok(created)
    }

    /// Replace an existing dislike with a like, adjusting both tallies.
    pub async fn switch_dislike_to_like(
        &self,
        existing: dislike::Model,
        replacement: like::ActiveModel,
    ) -> AppResult<like::Model> {
        let movie_id = existing.movie_id.clone();
        let txn = self.begin().await?;

        existing
            .delete(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Self::decrement_down_count(&txn, &movie_id).await?;
        let created = replacement
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Self::increment_up_count(&txn, &movie_id).await?;

        Self::commit(txn).await?;
        Ok(created)
    }

    // ==================== Tally updates ====================

    async fn increment_up_count(txn: &DatabaseTransaction, movie_id: &str) -> AppResult<()> {
        Movie::update_many()
            .col_expr(
                movie::Column::UpCount,
                Expr::col(movie::Column::UpCount).add(1),
            )
            .filter(movie::Column::Id.eq(movie_id))
            .exec(txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn increment_down_count(txn: &DatabaseTransaction, movie_id: &str) -> AppResult<()> {
        Movie::update_many()
            .col_expr(
                movie::Column::DownCount,
                Expr::col(movie::Column::DownCount).add(1),
            )
            .filter(movie::Column::Id.eq(movie_id))
            .exec(txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn decrement_up_count(txn: &DatabaseTransaction, movie_id: &str) -> AppResult<()> {
        Movie::update_many()
            .col_expr(
                movie::Column::UpCount,
                Expr::cust("GREATEST(up_count - 1, 0)"),
            )
            .filter(movie::Column::Id.eq(movie_id))
            .exec(txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn decrement_down_count(txn: &DatabaseTransaction, movie_id: &str) -> AppResult<()> {
        Movie::update_many()
            .col_expr(
                movie::Column::DownCount,
                Expr::cust("GREATEST(down_count - 1, 0)"),
            )
            .filter(movie::Column::Id.eq(movie_id))
            .exec(txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn begin(&self) -> AppResult<DatabaseTransaction> {
        self.db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn commit(txn: DatabaseTransaction) -> AppResult<()> {
        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

    fn create_test_like(id: &str, user_id: &str, movie_id: &str) -> like::Model {
        like::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            movie_id: movie_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_dislike(id: &str, user_id: &str, movie_id: &str) -> dislike::Model {
        dislike::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            movie_id: movie_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn exec_ok() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    #[tokio::test]
    async fn test_find_like_found() {
        let like = create_test_like("l1", "u1", "m1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[like.clone()]])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let result = repo.find_like("u1", "m1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().id, "l1");
    }

    #[tokio::test]
    async fn test_find_dislike_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<dislike::Model>::new()])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let result = repo.find_dislike("u1", "m1").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_record_like() {
        let like = create_test_like("l1", "u1", "m1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[like.clone()]])
                .append_exec_results([exec_ok()])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);

        let active = like::ActiveModel {
            id: Set("l1".to_string()),
            user_id: Set("u1".to_string()),
            movie_id: Set("m1".to_string()),
            created_at: Set(Utc::now().into()),
        };

        let result = repo.record_like("m1", active).await.unwrap();
        assert_eq!(result.movie_id, "m1");
    }

    #[tokio::test]
    async fn test_switch_like_to_dislike() {
        let existing = create_test_like("l1", "u1", "m1");
        let dislike = create_test_dislike("d1", "u1", "m1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[dislike.clone()]])
                .append_exec_results([exec_ok(), exec_ok(), exec_ok()])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);

        let replacement = dislike::ActiveModel {
            id: Set("d1".to_string()),
            user_id: Set("u1".to_string()),
            movie_id: Set("m1".to_string()),
            created_at: Set(Utc::now().into()),
        };

        let result = repo
            .switch_like_to_dislike(existing, replacement)
            .await
            .unwrap();
        assert_eq!(result.id, "d1");
    }

    #[tokio::test]
    async fn test_switch_dislike_to_like() {
        let existing = create_test_dislike("d1", "u1", "m1");
        let like = create_test_like("l1", "u1", "m1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[like.clone()]])
                .append_exec_results([exec_ok(), exec_ok(), exec_ok()])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);

        let replacement = like::ActiveModel {
            id: Set("l1".to_string()),
            user_id: Set("u1".to_string()),
            movie_id: Set("m1".to_string()),
            created_at: Set(Utc::now().into()),
        };

        let result = repo
            .switch_dislike_to_like(existing, replacement)
            .await
            .unwrap();
        assert_eq!(result.id, "l1");
    }

    #[tokio::test]
    async fn test_find_likes_by_user() {
        let l1 = create_test_like("l1", "u1", "m1");
        let l2 = create_test_like("l2", "u1", "m2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[l1, l2]])
                .into_connection(),
        );

        let repo = VoteRepository::new(db);
        let result = repo.find_likes_by_user("u1").await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
