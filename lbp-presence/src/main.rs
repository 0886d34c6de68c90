use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use lbp_presence::api::HttpApi;
use lbp_presence::config::{self, Bootstrap};
use lbp_presence::scheduler::Scheduler;
use lbp_presence::sink::DiscordSink;
use lbp_presence_store::PresenceCache;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    lbp_presence::logging::init();
    tracing::info!("lbp-presence version: {}", env!("CARGO_PKG_VERSION"));

    let config = match config::load(std::env::args().skip(1))
        .context("failed to load configuration")?
    {
        Bootstrap::Ready(config) => config,
        Bootstrap::TemplateWritten(path) => {
            tracing::warn!(
                "No configuration file existed, wrote a template to {}",
                path.display()
            );
            tracing::warn!("Please fill in the configuration file and restart the program.");
            return Ok(ExitCode::SUCCESS);
        }
        Bootstrap::Usage(flag) => {
            tracing::error!("Unknown flag '{}'. You may use one of the following:", flag);
            tracing::error!("  --config [path]  (read the configuration from a JSON file)");
            return Ok(ExitCode::FAILURE);
        }
    };

    tracing::info!(
        "Configuration: server_url={}, username={}, poll_interval={}s, exit_grace={}s",
        config.server_url,
        config.username,
        config.poll_interval.as_secs(),
        config.exit_grace.as_secs()
    );

    let api = HttpApi::new(&config.server_url).context("failed to build HTTP client")?;
    let cache = Arc::new(PresenceCache::new());
    let sink = Arc::new(DiscordSink::connect(config.discord_app_id));

    let scheduler = Scheduler::new(&config, Arc::new(api), cache, sink);
    let err = scheduler.run().await;
    tracing::debug!("Exiting after fatal error: {}", err);

    Ok(ExitCode::FAILURE)
}
