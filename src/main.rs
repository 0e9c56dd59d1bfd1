use anyhow::Context;
use axum::middleware;
use bloghaus::{AppConfig, BlogHaus, http, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    telemetry::init(&config.logging)?;

    let bloghaus = BlogHaus::new(&config)
        .await
        .context("connecting to postgres and redis")?;
    bloghaus.auto_migrate(false).await?;

    let app = http::router(bloghaus.articles()).layer(middleware::from_fn(http::forwarded_user));

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
