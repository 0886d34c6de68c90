//! The per-cycle lookup chain: player, then live status, then location.
//! Each stage feeds the next, so the requests run strictly in sequence.

mod player;
mod slot;
mod status;

use std::sync::Arc;

use lbp_presence_store::{LiveStatus, Player, PlayerName, PresenceCache, Slot};

use crate::api::LighthouseApi;
use crate::error::ApiError;

pub use player::PlayerResolver;
pub use slot::SlotResolver;
pub use status::StatusResolver;

/// Everything one cycle managed to find out. Any part may be missing.
#[derive(Debug, Clone, Default)]
pub struct Resolved {
    pub player: Option<Arc<Player>>,
    pub status: Option<LiveStatus>,
    pub slot: Option<Arc<Slot>>,
}

pub struct Pipeline {
    players: PlayerResolver,
    statuses: StatusResolver,
    slots: SlotResolver,
}

impl Pipeline {
    pub fn new(api: Arc<dyn LighthouseApi>, cache: Arc<PresenceCache>) -> Self {
        Self {
            players: PlayerResolver::new(Arc::clone(&api), Arc::clone(&cache)),
            statuses: StatusResolver::new(Arc::clone(&api)),
            slots: SlotResolver::new(api, cache),
        }
    }

    pub async fn resolve(&self, name: &PlayerName) -> Result<Resolved, ApiError> {
        let player = self.players.resolve(name).await?;
        let status = self.statuses.resolve(player.as_deref()).await?;
        let slot = self
            .slots
            .resolve(player.as_deref(), status.as_ref())
            .await?;

        Ok(Resolved {
            player,
            status,
            slot,
        })
    }
}
