use std::sync::Arc;

use lbp_presence_store::{Player, PlayerName, PresenceCache};
use tracing::info;

use crate::api::LighthouseApi;
use crate::error::{ApiError, absent_unless_fatal};

/// Resolves the tracked player, hitting the server at most once per name.
pub struct PlayerResolver {
    api: Arc<dyn LighthouseApi>,
    cache: Arc<PresenceCache>,
}

impl PlayerResolver {
    pub fn new(api: Arc<dyn LighthouseApi>, cache: Arc<PresenceCache>) -> Self {
        Self { api, cache }
    }

    /// Returns `Ok(None)` for an unknown player; the failed lookup is not
    /// cached, so the next cycle asks again.
    pub async fn resolve(&self, name: &PlayerName) -> Result<Option<Arc<Player>>, ApiError> {
        if let Some(player) = self.cache.player(name).await {
            return Ok(Some(player));
        }

        info!(%name, "fetching user from the server");
        let Some(player) = absent_unless_fatal(self.api.player(name).await)? else {
            return Ok(None);
        };

        let player = Arc::new(player);
        self.cache.put_player(*name, Arc::clone(&player)).await;
        Ok(Some(player))
    }
}
