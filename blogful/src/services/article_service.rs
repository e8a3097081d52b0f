use sqlx::SqlitePool;

use crate::models::{Article, ArticleUpdate, NewArticle};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS blogful_articles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    style TEXT NOT NULL,
    date_published TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)";

const COLUMNS: &str = "id, title, content, style, date_published";

/// Persistence gateway for `blogful_articles`.
///
/// Thin wrapper over parameterized statements: no validation, no
/// sanitization.
#[derive(Clone)]
pub struct ArticleService {
    pool: SqlitePool,
}

impl ArticleService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the articles table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        tracing::info!("articles table ready");
        Ok(())
    }

    pub async fn get_all_articles(&self) -> Result<Vec<Article>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM blogful_articles");
        let articles = sqlx::query_as::<_, Article>(&sql)
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!(count = articles.len(), "listed articles");
        Ok(articles)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Article>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM blogful_articles WHERE id = ?");
        sqlx::query_as::<_, Article>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert_article(&self, article: NewArticle) -> Result<Article, sqlx::Error> {
        let sql = format!(
            "INSERT INTO blogful_articles (title, content, style) VALUES (?, ?, ?) RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Article>(&sql)
            .bind(article.title)
            .bind(article.content)
            .bind(article.style)
            .fetch_one(&self.pool)
            .await?;
        tracing::debug!(id = created.id, "inserted article");
        Ok(created)
    }

    /// Delete the row with `id`, if any. Zero affected rows is not an error.
    pub async fn delete_article(&self, id: i64) -> Result<(), sqlx::Error> {
        let result = sqlx::query("DELETE FROM blogful_articles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!(id, rows = result.rows_affected(), "deleted article");
        Ok(())
    }

    /// Write the provided columns of row `id`. Zero affected rows is not an
    /// error.
    pub async fn update_article(&self, id: i64, update: ArticleUpdate) -> Result<(), sqlx::Error> {
        if update.is_empty() {
            return Ok(());
        }
        let result = sqlx::query(
            "UPDATE blogful_articles SET \
                title = COALESCE(?, title), \
                content = COALESCE(?, content), \
                style = COALESCE(?, style) \
             WHERE id = ?",
        )
        .bind(update.title)
        .bind(update.content)
        .bind(update.style)
        .bind(id)
        .execute(&self.pool)
        .await?;
        tracing::debug!(id, rows = result.rows_affected(), "updated article");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn service() -> ArticleService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let service = ArticleService::new(pool);
        service.init_schema().await.unwrap();
        service
    }

    fn new_article(title: &str) -> NewArticle {
        NewArticle {
            title: title.to_string(),
            content: "Lorem ipsum".to_string(),
            style: "Story".to_string(),
        }
    }

    #[tokio::test]
    async fn empty_table_lists_nothing() {
        let service = service().await;
        assert!(service.get_all_articles().await.unwrap().is_empty());
        assert!(service.get_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamp() {
        let service = service().await;
        let before = chrono::Utc::now() - chrono::Duration::seconds(5);
        let first = service.insert_article(new_article("First")).await.unwrap();
        let second = service.insert_article(new_article("Second")).await.unwrap();

        assert!(second.id > first.id);
        assert!(first.date_published > before);
        assert_eq!(service.get_by_id(first.id).await.unwrap(), Some(first.clone()));

        let all = service.get_all_articles().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn update_touches_only_provided_columns() {
        let service = service().await;
        let article = service.insert_article(new_article("Before")).await.unwrap();

        let update = ArticleUpdate {
            title: Some("After".into()),
            ..ArticleUpdate::default()
        };
        service.update_article(article.id, update).await.unwrap();

        let updated = service.get_by_id(article.id).await.unwrap().unwrap();
        assert_eq!(updated.title, "After");
        assert_eq!(updated.content, article.content);
        assert_eq!(updated.style, article.style);
        assert_eq!(updated.date_published, article.date_published);
    }

    #[tokio::test]
    async fn writes_to_missing_rows_are_silent() {
        let service = service().await;
        service.delete_article(42).await.unwrap();
        let update = ArticleUpdate {
            style: Some("News".into()),
            ..ArticleUpdate::default()
        };
        service.update_article(42, update).await.unwrap();
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let service = service().await;
        let first = service.insert_article(new_article("One")).await.unwrap();
        service.delete_article(first.id).await.unwrap();
        assert!(service.get_by_id(first.id).await.unwrap().is_none());

        let next = service.insert_article(new_article("Two")).await.unwrap();
        assert!(next.id > first.id);
    }
}
