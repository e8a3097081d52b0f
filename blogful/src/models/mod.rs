mod article;

pub use article::{
    Article, ArticleUpdate, CreateArticleRequest, NewArticle, SerializedArticle,
    UpdateArticleRequest,
};
