//! Request-body checks for article creation and partial update.

use crate::error::AppError;
use crate::models::{ArticleUpdate, CreateArticleRequest, NewArticle, UpdateArticleRequest};

/// Fields checked on creation, in reporting order.
pub const REQUIRED_FIELDS: [&str; 3] = ["title", "content", "style"];

/// Check a creation body, reporting only the first missing field.
///
/// `null` counts as missing; an empty string does not.
pub fn validate_new_article(req: CreateArticleRequest) -> Result<NewArticle, AppError> {
    let CreateArticleRequest {
        title,
        content,
        style,
    } = req;

    let missing = |field: &str| AppError::ValidationFailed(format!("Missing '{field}' in request body"));
    let title = title.ok_or_else(|| missing("title"))?;
    let content = content.ok_or_else(|| missing("content"))?;
    let style = style.ok_or_else(|| missing("style"))?;

    Ok(NewArticle {
        title,
        content,
        style,
    })
}

fn is_truthy(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Check a partial-update body.
///
/// At least one of `title`, `style`, `content` must be a non-empty string.
/// Once that holds, every field that was sent is written, including empty
/// strings.
pub fn validate_article_update(req: UpdateArticleRequest) -> Result<ArticleUpdate, AppError> {
    if !(is_truthy(&req.title) || is_truthy(&req.style) || is_truthy(&req.content)) {
        return Err(AppError::ValidationFailed(
            "Request body must contain either 'title', 'style' or 'content'".to_string(),
        ));
    }

    Ok(ArticleUpdate {
        title: req.title,
        content: req.content,
        style: req.style,
    })
}
