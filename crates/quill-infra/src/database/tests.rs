#[cfg(test)]
mod tests {
    use crate::database::entity::post;
    use crate::database::postgres_repo::PostgresPostRepository;
    use quill_core::domain::Post;
    use quill_core::error::RepoError;
    use quill_core::ports::{BaseRepository, PageRequest, PostFilter, PostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(title: &str, category: &str) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: uuid::Uuid::new_v4(),
            title: title.to_owned(),
            content: "Content".to_owned(),
            category: category.to_owned(),
            author: uuid::Uuid::new_v4(),
            slug: format!("{}-abcdef", title.to_lowercase()),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let row = model("Test", "news");
        let post_id = row.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test");
        assert_eq!(post.id, post_id);
        assert_eq!(post.slug, "test-abcdef");
    }

    #[tokio::test]
    async fn test_find_page_filters_by_category() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model("One", "news"), model("Two", "news")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let posts = repo
            .find_page(
                &PostFilter {
                    category: Some("news".to_string()),
                },
                PageRequest {
                    offset: 10,
                    limit: 2,
                },
            )
            .await
            .unwrap();
        assert_eq!(posts.len(), 2);

        let log = format!("{:?}", repo.into_transaction_log());
        assert!(log.contains("category"));
        assert!(log.contains("ORDER BY"));
        assert!(log.contains("LIMIT") && log.contains("OFFSET"));
        assert!(log.contains("news"));
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo.delete(uuid::Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_insert_is_a_plain_insert() {
        let row = model("Fresh", "news");
        let post: Post = row.clone().into();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let stored = repo.insert(post.clone()).await.unwrap();
        assert_eq!(stored, post);

        let log = format!("{:?}", repo.into_transaction_log());
        assert!(log.contains("INSERT INTO"));
        assert!(!log.contains("ON CONFLICT"));
    }

    #[tokio::test]
    async fn test_update_sets_only_mutable_columns() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let mut post: Post = model("Edited", "news").into();
        post.content = "Rewritten".to_string();

        let stored = repo.update(post.clone()).await.unwrap();
        assert_eq!(stored, post);

        let log = format!("{:?}", repo.into_transaction_log());
        assert!(log.contains("UPDATE"));
        for column in ["title", "content", "category", "updated_at"] {
            assert!(log.contains(column), "{column} missing from {log}");
        }
        for column in ["author", "slug", "created_at", "INSERT"] {
            assert!(!log.contains(column), "{column} present in {log}");
        }
    }

    #[tokio::test]
    async fn test_update_after_delete_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo.update(model("Gone", "news").into()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));

        let log = format!("{:?}", repo.into_transaction_log());
        assert!(!log.contains("INSERT"));
    }
}
