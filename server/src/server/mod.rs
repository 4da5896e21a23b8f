pub mod api;
pub mod router;

use anyhow::Result;

use crate::config::AppConfig;

/// Start the axum HTTP server and run until Ctrl+C.
pub async fn start_server(config: AppConfig) -> Result<()> {
    let app = router::create_router(&config);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        max_upload_bytes = config.max_upload_bytes,
        "Process server listening on http://{}",
        addr
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {e}");
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutting down...");
        })
        .await?;

    Ok(())
}
