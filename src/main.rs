use std::sync::Arc;

use coursehub::logging::{init_tracing, shutdown_tracer};
use coursehub::metrics::{init_metrics, metrics_app};
use coursehub::notifications::{ChannelNotificationQueue, EmailService, NotificationWorker};
use coursehub::router::init_router;
use coursehub::state::init_app_state;
use coursehub_config::ServerConfig;
use dotenvy::dotenv;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let server_config = ServerConfig::from_env();

    let (queue, receiver) = ChannelNotificationQueue::new();
    let state = init_app_state(Arc::new(queue)).await;

    sqlx::migrate!("./migrations").run(&state.db).await?;
    info!("Database migrations applied");

    let worker = NotificationWorker::new(
        state.db.clone(),
        EmailService::new(state.email_config.clone()),
        receiver,
    );
    tokio::spawn(worker.run());

    match init_metrics() {
        Ok(Some(handle)) => {
            let metrics_addr = server_config.metrics_addr();
            let listener = tokio::net::TcpListener::bind(&metrics_addr).await?;
            info!("Metrics available at http://{}/metrics", metrics_addr);
            tokio::spawn(async move {
                if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                    error!(error = %e, "Metrics server stopped");
                }
            });
        }
        Ok(None) => info!("Observability disabled, metrics server not started"),
        Err(e) => warn!(error = %e, "Failed to install metrics recorder"),
    }

    let app = init_router(state);

    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
