use dotenv::dotenv;
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use dinebook::config::AppConfig;
use dinebook::routes::app;
use dinebook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Missing secrets abort here rather than at the first request.
    let config = AppConfig::from_env()?;

    let pool = PgPool::connect(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;

    let app = app(AppState::new(pool, config));

    let addr = "127.0.0.1:8000";
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
