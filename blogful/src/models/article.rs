use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize_html;

/// A row of `blogful_articles`.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub style: String,
    pub date_published: DateTime<Utc>,
}

/// Fields for an insert; storage fills in `id` and `date_published`.
#[derive(Clone, Debug)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub style: String,
}

/// Partial update. `None` columns are left untouched.
#[derive(Clone, Debug, Default)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub style: Option<String>,
}

impl ArticleUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.style.is_none()
    }
}

/// `POST /articles` body. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CreateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub style: Option<String>,
}

/// `PATCH /articles/{article_id}` body. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub style: Option<String>,
}

/// Outbound representation of an [`Article`], with `title` and `content`
/// passed through the HTML filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedArticle {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub style: String,
    pub date_published: DateTime<Utc>,
}

impl From<Article> for SerializedArticle {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: sanitize_html(&article.title),
            content: sanitize_html(&article.content),
            style: article.style,
            date_published: article.date_published,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, content: &str) -> Article {
        Article {
            id: 3,
            title: title.to_string(),
            content: content.to_string(),
            style: "<b>How-to</b>".to_string(),
            date_published: Utc::now(),
        }
    }

    #[test]
    fn serialization_sanitizes_title_and_content_only() {
        let raw = article("<script>x</script>", "<em onclick=\"steal()\">hi</em>");
        let out = SerializedArticle::from(raw.clone());
        assert_eq!(out.id, 3);
        assert_eq!(out.title, "&lt;script&gt;x&lt;/script&gt;");
        assert_eq!(out.content, "<em>hi</em>");
        assert_eq!(out.style, raw.style);
        assert_eq!(out.date_published, raw.date_published);
    }

    #[test]
    fn serialized_shape_has_exactly_five_fields() {
        let json = serde_json::to_value(SerializedArticle::from(article("t", "c"))).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["content", "date_published", "id", "style", "title"]);
    }

    #[test]
    fn update_requests_ignore_unknown_fields() {
        let req: UpdateArticleRequest =
            serde_json::from_str(r#"{"title":"new","fieldToIgnore":"x"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("new"));
        assert!(req.content.is_none());
    }
}
