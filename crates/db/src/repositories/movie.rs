//! Movie repository.

use std::sync::Arc;

use crate::entities::{Movie, movie};
use reelvote_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Movie repository for database operations.
#[derive(Clone)]
pub struct MovieRepository {
    db: Arc<DatabaseConnection>,
}

impl MovieRepository {
    /// Create a new movie repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a movie by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<movie::Model>> {
        Movie::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a movie by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<movie::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::MovieNotFound(id.to_string()))
    }

    /// Find a movie by its external query ID.
    pub async fn find_by_query_id(&self, query_id: &str) -> AppResult<Option<movie::Model>> {
        Movie::find()
            .filter(movie::Column::QueryId.eq(query_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find movies by their external query IDs.
    pub async fn find_by_query_ids(&self, query_ids: &[String]) -> AppResult<Vec<movie::Model>> {
        if query_ids.is_empty() {
            return Ok(vec![]);
        }

        Movie::find()
            .filter(movie::Column::QueryId.is_in(query_ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find movies by internal IDs.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<movie::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        Movie::find()
            .filter(movie::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(movie::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new movie.
    pub async fn create(&self, model: movie::ActiveModel) -> AppResult<movie::Model> {
        model
            .insert(self.db.as_ref())
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

    fn create_test_movie(id: &str, query_id: &str) -> movie::Model {
        movie::Model {
            id: id.to_string(),
            title: "Test Movie".to_string(),
            query_id: query_id.to_string(),
            up_count: 0,
            down_count: 0,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_query_id_found() {
        let movie = create_test_movie("m1", "tt0111161");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[movie.clone()]])
                .into_connection(),
        );

        let repo = MovieRepository::new(db);
        let result = repo.find_by_query_id("tt0111161").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().id, "m1");
    }

    #[tokio::test]
    async fn test_find_by_query_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<movie::Model>::new()])
                .into_connection(),
        );

        let repo = MovieRepository::new(db);
        let result = repo.find_by_query_id("unknown").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<movie::Model>::new()])
                .into_connection(),
        );

        let repo = MovieRepository::new(db);
        let result = repo.get_by_id("missing").await;

        match result {
            Err(AppError::MovieNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected MovieNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_query_ids_empty_input_skips_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = MovieRepository::new(db);
        let result = repo.find_by_query_ids(&[]).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_query_ids() {
        let m1 = create_test_movie("m1", "q1");
        let m2 = create_test_movie("m2", "q2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[m1, m2]])
                .into_connection(),
        );

        let repo = MovieRepository::new(db);
        let result = repo
            .find_by_query_ids(&["q1".to_string(), "q2".to_string()])
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_create() {
        let movie = create_test_movie("m1", "q1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[movie.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = MovieRepository::new(db);

        let active = movie::ActiveModel {
            id: Set("m1".to_string()),
            title: Set("Test Movie".to_string()),
            query_id: Set("q1".to_string()),
            up_count: Set(0),
            down_count: Set(0),
            created_at: Set(Utc::now().into()),
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.query_id, "q1");
    }
}
