//! Drives one presence cycle per interval until something fatal happens.

use std::sync::Arc;
use std::time::Duration;

use lbp_presence_store::{PlayerName, PresenceCache};
use tracing::debug;

use crate::api::LighthouseApi;
use crate::config::Config;
use crate::error::ApiError;
use crate::logging::report_fatal;
use crate::presence::{PresencePayload, synthesize};
use crate::resolver::Pipeline;
use crate::sink::PresenceSink;

pub struct Scheduler {
    pipeline: Pipeline,
    sink: Arc<dyn PresenceSink>,
    server_url: String,
    username: PlayerName,
    poll_interval: Duration,
    exit_grace: Duration,
}

impl Scheduler {
    pub fn new(
        config: &Config,
        api: Arc<dyn LighthouseApi>,
        cache: Arc<PresenceCache>,
        sink: Arc<dyn PresenceSink>,
    ) -> Self {
        Self {
            pipeline: Pipeline::new(api, cache),
            sink,
            server_url: config.server_url.clone(),
            username: config.username,
            poll_interval: config.poll_interval,
            exit_grace: config.exit_grace,
        }
    }

    /// Resolve, synthesize and publish once.
    pub async fn run_cycle(&self) -> Result<PresencePayload, ApiError> {
        let resolved = self.pipeline.resolve(&self.username).await?;

        let payload = synthesize(
            &self.server_url,
            resolved.player.as_deref(),
            resolved.status.as_ref(),
            resolved.slot.as_deref(),
        );

        self.sink.publish(&payload);
        debug!(
            sink = self.sink.name(),
            details = %payload.details,
            state = %payload.state,
            "sending presence update"
        );
        Ok(payload)
    }

    /// Run cycles back to back, `poll_interval` apart. On the first failure
    /// the sink is closed, the error reported and, after `exit_grace`,
    /// handed back so the caller can exit.
    pub async fn run(&self) -> ApiError {
        loop {
            if let Err(err) = self.run_cycle().await {
                self.sink.close();
                report_fatal(&err);
                tokio::time::sleep(self.exit_grace).await;
                return err;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
