//! In-memory cache for resolved players and slots.
//!
//! Entries live for the whole process and are never evicted. Player records
//! and level metadata change rarely, so durability isn't needed; live status
//! is never stored here.

use std::hash::Hash;
use std::sync::Arc;

use tracing::debug;

use crate::key::SlotKey;
use crate::models::{Player, PlayerName, Slot};

/// Thread-safe lookup tables shared by the resolvers.
/// Uses scc::HashMap for lock-free concurrent access.
pub struct PresenceCache {
    players: scc::HashMap<PlayerName, Arc<Player>>,
    /// `None` values record a level the server could not describe.
    slots: scc::HashMap<SlotKey, Option<Arc<Slot>>>,
}

impl PresenceCache {
    pub fn new() -> Self {
        Self {
            players: scc::HashMap::new(),
            slots: scc::HashMap::new(),
        }
    }

    pub async fn player(&self, name: &PlayerName) -> Option<Arc<Player>> {
        self.players
            .read_async(name, |_, player| Arc::clone(player))
            .await
    }

    /// Store a player under its name. Last writer wins.
    pub async fn put_player(&self, name: PlayerName, player: Arc<Player>) {
        debug!(%name, user_id = player.user_id, "caching player");
        upsert(&self.players, name, player).await;
    }

    /// Look up a slot. The outer `Option` is hit/miss, the inner one is the
    /// cached value, which may itself be absent.
    pub async fn slot(&self, key: &SlotKey) -> Option<Option<Arc<Slot>>> {
        self.slots.read_async(key, |_, slot| slot.clone()).await
    }

    /// Store a slot (or its absence) under `key`. Last writer wins.
    pub async fn put_slot(&self, key: SlotKey, slot: Option<Arc<Slot>>) {
        debug!(?key, present = slot.is_some(), "caching slot");
        upsert(&self.slots, key, slot).await;
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

impl Default for PresenceCache {
    fn default() -> Self {
        Self::new()
    }
}

async fn upsert<K: Eq + Hash + 'static, V: 'static>(map: &scc::HashMap<K, V>, key: K, value: V) {
    if let Err((key, value)) = map.insert_async(key, value).await {
        let _ = map.update_async(&key, |_, current| *current = value).await;
    }
}
