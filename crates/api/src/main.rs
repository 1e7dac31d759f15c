use anyhow::Result;
use tracing::info;

mod app;
mod config;
mod error;
mod middleware;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;
    middleware::logging::init_logging(&config.logging);
    middleware::metrics::init_metrics();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "storefront-admin starting"
    );

    let pool = persistence::db::create_pool(&config.database).await?;

    // Schema is applied on boot so a fresh database needs no manual step.
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("database schema up to date");

    let addr = config.socket_addr();
    let app = app::create_app(config, pool);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
