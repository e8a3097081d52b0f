use blogful::services::ArticleService;
use blogful::settings::Settings;
use blogful::AppState;
use blogful_core::{init_tracing, BlogfulConfig};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = BlogfulConfig::load("dev")?;
    let settings = Settings::from_config(&config)?;
    init_tracing(settings.mode);
    tracing::info!(profile = config.profile(), mode = %settings.mode, "starting blogful");

    let pool = blogful::connect(&settings).await?;
    let state = AppState::new(ArticleService::new(pool.clone()));

    blogful::app(state, &settings)
        .on_start(|state: AppState| async move {
            state.articles.init_schema().await?;
            Ok::<(), BoxError>(())
        })
        .on_stop(move || async move {
            tracing::info!("closing database pool");
            pool.close().await;
        })
        .serve(&settings.addr())
        .await
}
