use std::sync::Arc;

use lbp_presence_store::{LiveStatus, Player};
use tracing::debug;

use crate::api::LighthouseApi;
use crate::error::{ApiError, absent_unless_fatal};

/// Fetches the live status of a player. Never cached.
pub struct StatusResolver {
    api: Arc<dyn LighthouseApi>,
}

impl StatusResolver {
    pub fn new(api: Arc<dyn LighthouseApi>) -> Self {
        Self { api }
    }

    pub async fn resolve(&self, player: Option<&Player>) -> Result<Option<LiveStatus>, ApiError> {
        let Some(player) = player else {
            return Ok(None);
        };

        debug!(user_id = player.user_id, username = %player.username, "fetching status");
        absent_unless_fatal(self.api.status(player.user_id).await)
    }
}
