// File: autosnap/src/main.rs
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use autosnap::config::ConfigManager;
use autosnap::constants::defaults;
use autosnap::http::HttpCloudClient;
use autosnap::logging;
use autosnap::orchestrator::RunOrchestrator;
use autosnap::scheduler::SnapshotScheduler;
use autosnap::services::WebhookNotifier;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path =
        std::env::var("AUTOSNAP_CONFIG").unwrap_or_else(|_| defaults::CONFIG_PATH.to_string());
    // The log file is only known once config is loaded
    let config_manager = {
        let _startup_logging = tracing::subscriber::set_default(logging::bootstrap());
        ConfigManager::new(config_path).await?
    };
    let config = config_manager.get_current_config();

    logging::init(config.log_file.as_deref())?;
    info!(
        "Starting autosnap for region {} (tag '{}', dry run: {})",
        config.region, config.tag_name, config.dry_run
    );

    let cloud = Arc::new(HttpCloudClient::new(&config)?);
    let mut orchestrator = RunOrchestrator::new(&config, cloud.clone(), cloud);

    match (&config.notification_channel, &config.notification_webhook_url) {
        (Some(channel), Some(url)) if config.notifications_enabled() => {
            let notifier = Arc::new(WebhookNotifier::new(url.clone(), config.proxy_url())?);
            info!(
                "Run reports for channel {} will be sent to {}",
                channel,
                notifier.get_webhook_url()
            );
            orchestrator = orchestrator.with_notifier(notifier, channel.clone());
        }
        _ => warn!("No notification channel configured - run reports will only be logged"),
    }

    let orchestrator = Arc::new(orchestrator);

    match &config.schedule {
        None => {
            let summary = orchestrator.run(Utc::now()).await;
            info!(
                "Run complete: {} created, {} deleted, {} errors",
                summary.created, summary.deleted, summary.errors
            );
        }
        Some(schedule) => {
            let scheduler = SnapshotScheduler::new(orchestrator.clone()).await?;
            scheduler.start(schedule).await?;
            wait_for_shutdown().await;
            info!("Received shutdown signal");
            scheduler.shutdown().await?;
        }
    }

    Ok(())
}

async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
