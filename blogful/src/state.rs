use axum::extract::FromRef;

use crate::services::ArticleService;

#[derive(Clone)]
pub struct AppState {
    pub articles: ArticleService,
}

impl AppState {
    pub fn new(articles: ArticleService) -> Self {
        Self { articles }
    }
}

impl FromRef<AppState> for ArticleService {
    fn from_ref(state: &AppState) -> Self {
        state.articles.clone()
    }
}
