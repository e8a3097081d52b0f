use axum::extract::{OriginalUri, Path, Request, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use blogful_core::JsonBody;

use crate::error::AppError;
use crate::models::{Article, CreateArticleRequest, SerializedArticle, UpdateArticleRequest};
use crate::services::ArticleService;
use crate::state::AppState;
use crate::validation::{validate_article_update, validate_new_article};

/// Routes for the articles collection and its detail resources.
///
/// Detail routes resolve their article through [`lookup_article`] before the
/// handler runs.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/articles", get(list_articles).post(create_article))
        .route(
            "/articles/{article_id}",
            get(get_article)
                .delete(delete_article)
                .patch(update_article)
                .route_layer(middleware::from_fn_with_state(state, lookup_article)),
        )
}

/// Resolve `{article_id}` and hand the article to the handler as an
/// `Extension<Article>`. Ids that are not integers cannot match a row.
pub async fn lookup_article(
    State(articles): State<ArticleService>,
    Path(article_id): Path<String>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Ok(id) = article_id.parse::<i64>() else {
        return Err(AppError::NotFound);
    };
    let article = articles.get_by_id(id).await?.ok_or(AppError::NotFound)?;
    req.extensions_mut().insert(article);
    Ok(next.run(req).await)
}

// ── Collection ──────────────────────────────────────────────────────────

async fn list_articles(
    State(articles): State<ArticleService>,
) -> Result<Json<Vec<SerializedArticle>>, AppError> {
    let all = articles.get_all_articles().await?;
    Ok(Json(all.into_iter().map(SerializedArticle::from).collect()))
}

async fn create_article(
    State(articles): State<ArticleService>,
    OriginalUri(uri): OriginalUri,
    JsonBody(body): JsonBody<CreateArticleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_article = validate_new_article(body)?;
    let article = articles.insert_article(new_article).await?;
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), article.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(SerializedArticle::from(article)),
    ))
}

// ── Detail ──────────────────────────────────────────────────────────────

async fn get_article(Extension(article): Extension<Article>) -> Json<SerializedArticle> {
    Json(SerializedArticle::from(article))
}

async fn delete_article(
    State(articles): State<ArticleService>,
    Extension(article): Extension<Article>,
) -> Result<StatusCode, AppError> {
    articles.delete_article(article.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn update_article(
    State(articles): State<ArticleService>,
    Extension(article): Extension<Article>,
    JsonBody(body): JsonBody<UpdateArticleRequest>,
) -> Result<StatusCode, AppError> {
    let update = validate_article_update(body)?;
    articles.update_article(article.id, update).await?;
    Ok(StatusCode::NO_CONTENT)
}
