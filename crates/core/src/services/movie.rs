//! Movie service.

use std::collections::HashMap;

use reelvote_common::AppResult;
use reelvote_db::{entities::movie, repositories::MovieRepository};

/// Movie service for lookup operations.
#[derive(Clone)]
pub struct MovieService {
    movie_repo: MovieRepository,
}

impl MovieService {
    /// Create a new movie service.
    #[must_use]
    pub const fn new(movie_repo: MovieRepository) -> Self {
        Self { movie_repo }
    }

    /// Resolve a batch of external query IDs to known movies.
    ///
    /// Unknown IDs are skipped silently; the result preserves request order.
    pub async fn lookup(&self, queries: &[String]) -> AppResult<Vec<movie::Model>> {
        let found = self.movie_repo.find_by_query_ids(queries).await?;
        let by_query_id: HashMap<&str, &movie::Model> =
            found.iter().map(|m| (m.query_id.as_str(), m)).collect();

        Ok(queries
            .iter()
            .filter_map(|q| by_query_id.get(q.as_str()).map(|&m| m.clone()))
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

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
    async fn test_lookup_skips_unknown_ids() {
        let m1 = create_test_movie("m1", "q1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[m1]])
                .into_connection(),
        );

        let service = MovieService::new(MovieRepository::new(db));
        let result = service
            .lookup(&["q1".to_string(), "unknown".to_string()])
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].query_id, "q1");
    }

    #[tokio::test]
    async fn test_lookup_preserves_request_order() {
        let m1 = create_test_movie("m1", "q1");
        let m2 = create_test_movie("m2", "q2");

        // Store returns q1 before q2 regardless of the requested order
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[m1, m2]])
                .into_connection(),
        );

        let service = MovieService::new(MovieRepository::new(db));
        let result = service
            .lookup(&["q2".to_string(), "q1".to_string()])
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].query_id, "q2");
        assert_eq!(result[1].query_id, "q1");
    }

    #[tokio::test]
    async fn test_lookup_empty_input() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = MovieService::new(MovieRepository::new(db));
        let result = service.lookup(&[]).await.unwrap();

        assert!(result.is_empty());
    }
}
