use std::process::ExitCode;

use tokio::sync::watch;

use garage_door::adapters::{app_router, MonitorScheduler, MonitorSchedulerConfig};
use garage_door::bootstrap::{build_services, init_tracing};
use garage_door::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.server);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return ExitCode::FAILURE;
    }
    for setting in config.missing_settings() {
        tracing::warn!(setting, "Required setting is not configured");
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Service stopped with error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let services = build_services(&config).await?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let scheduler = if config.monitor.enabled {
        let scheduler = MonitorScheduler::new(
            services.monitor.clone(),
            MonitorSchedulerConfig::from(&config.monitor),
        );
        Some(tokio::spawn(async move { scheduler.run(shutdown_rx).await }))
    } else {
        tracing::info!("Scheduled monitor disabled");
        None
    };

    let addr = config.server.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, threshold_minutes = config.monitor.threshold_minutes, "Listening");

    let router = app_router(services.app_state(), config.server.request_timeout());
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Some(handle) = scheduler {
        let _ = handle.await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
