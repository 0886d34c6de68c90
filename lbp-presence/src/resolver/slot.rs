//! Location resolution: turns a live status into a cached slot.
//!
//! User-created levels are fetched from the server once per id. Every other
//! state (menus, pod, moon, story, anything unrecognized) has no server
//! identity and is synthesized from a static table instead.

use std::sync::Arc;

use lbp_presence_store::{LiveStatus, Placeholder, Player, PresenceCache, Slot, SlotKey};
use tracing::{debug, info};

use crate::api::LighthouseApi;
use crate::error::{ApiError, absent_unless_fatal};

pub struct SlotResolver {
    api: Arc<dyn LighthouseApi>,
    cache: Arc<PresenceCache>,
}

impl SlotResolver {
    pub fn new(api: Arc<dyn LighthouseApi>, cache: Arc<PresenceCache>) -> Self {
        Self { api, cache }
    }

    /// A cache hit is returned as-is, including a level the server failed to
    /// describe earlier. A fatal error is never cached.
    pub async fn resolve(
        &self,
        player: Option<&Player>,
        status: Option<&LiveStatus>,
    ) -> Result<Option<Arc<Slot>>, ApiError> {
        let key = SlotKey::for_room(status.and_then(LiveStatus::room_slot));

        if let Some(cached) = self.cache.slot(&key).await {
            debug!(?key, "using cached slot");
            return Ok(cached);
        }

        let slot = match key {
            SlotKey::Placeholder(placeholder) => {
                info!(
                    ?placeholder,
                    "not a real slot, using a placeholder (offline or not in a user level)"
                );
                Some(Arc::new(placeholder_slot(placeholder, player)))
            }
            SlotKey::Level(slot_id) => {
                info!(slot_id, "fetching slot from the server");
                absent_unless_fatal(self.api.slot(slot_id).await)?.map(Arc::new)
            }
        };

        self.cache.put_slot(key, slot.clone()).await;
        Ok(slot)
    }
}

fn placeholder_slot(placeholder: Placeholder, player: Option<&Player>) -> Slot {
    Slot {
        id: placeholder.reserved_id(),
        name: placeholder.label().to_string(),
        icon_hash: player.map(|p| p.meh_hash.clone()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, in_room, offline, player, slot, unreachable};
    use lbp_presence_store::SlotType;

    fn resolver(api: &Arc<FakeApi>, cache: &Arc<PresenceCache>) -> SlotResolver {
        SlotResolver::new(Arc::clone(api) as Arc<dyn LighthouseApi>, Arc::clone(cache))
    }

    #[tokio::test]
    async fn test_user_level_is_fetched_once_and_cached_by_id() {
        let api = Arc::new(FakeApi::default().with_slot(slot(42, "Bob's Castle")));
        let cache = Arc::new(PresenceCache::new());
        let slots = resolver(&api, &cache);
        let bob = player(2, "bob");
        let status = in_room(SlotType::User, 42, vec![2]);

        let first = slots.resolve(Some(&bob), Some(&status)).await.unwrap().unwrap();
        assert_eq!(first.name, "Bob's Castle");
        assert_eq!(api.requests(), (0, 0, 1));

        let cached = cache.slot(&SlotKey::Level(42)).await.flatten().unwrap();
        assert!(Arc::ptr_eq(&first, &cached));

        let second = slots.resolve(Some(&bob), Some(&status)).await.unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(api.requests(), (0, 0, 1));
    }

    #[tokio::test]
    async fn test_failed_level_lookup_stays_absent() {
        let api = Arc::new(FakeApi::default());
        let cache = Arc::new(PresenceCache::new());
        let slots = resolver(&api, &cache);
        let status = in_room(SlotType::User, 7, vec![1]);

        assert_eq!(slots.resolve(None, Some(&status)).await, Ok(None));

        // the level appearing later does not help; the absence is cached
        api.set_slot(7, Ok(slot(7, "Late Level")));
        assert_eq!(slots.resolve(None, Some(&status)).await, Ok(None));

        assert_eq!(api.requests(), (0, 0, 1));
        assert_eq!(cache.slot(&SlotKey::Level(7)).await, Some(None));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_not_cached() {
        let api = Arc::new(FakeApi::default());
        api.set_slot(9, Err(unreachable()));
        let cache = Arc::new(PresenceCache::new());
        let slots = resolver(&api, &cache);
        let status = in_room(SlotType::User, 9, vec![1]);

        assert_eq!(slots.resolve(None, Some(&status)).await, Err(unreachable()));
        assert_eq!(cache.slot_count(), 0);
    }

    #[tokio::test]
    async fn test_no_room_synthesizes_menu_placeholder() {
        let api = Arc::new(FakeApi::default());
        let cache = Arc::new(PresenceCache::new());
        let slots = resolver(&api, &cache);
        let alice = player(1, "alice");

        let menu = slots
            .resolve(Some(&alice), Some(&offline()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(menu.id, Placeholder::Menu.reserved_id());
        assert_eq!(menu.name, Placeholder::Menu.label());
        assert_eq!(menu.icon_hash, "alice-meh");
        assert_eq!(api.requests(), (0, 0, 0));
    }

    #[tokio::test]
    async fn test_absent_status_is_treated_as_no_room() {
        let api = Arc::new(FakeApi::default());
        let cache = Arc::new(PresenceCache::new());
        let slots = resolver(&api, &cache);

        let menu = slots.resolve(None, None).await.unwrap().unwrap();
        assert_eq!(menu.id, Placeholder::Menu.reserved_id());
        assert_eq!(menu.icon_hash, "");
    }

    #[tokio::test]
    async fn test_placeholder_ignores_room_slot_id() {
        let api = Arc::new(FakeApi::default());
        let cache = Arc::new(PresenceCache::new());
        let slots = resolver(&api, &cache);
        let alice = player(1, "alice");

        let first = slots
            .resolve(Some(&alice), Some(&in_room(SlotType::Pod, 0, vec![1])))
            .await
            .unwrap()
            .unwrap();
        let second = slots
            .resolve(Some(&alice), Some(&in_room(SlotType::Pod, 31337, vec![1])))
            .await
            .unwrap()
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.id, Placeholder::Pod.reserved_id());
        assert_eq!(cache.slot_count(), 1);
        assert_eq!(api.requests(), (0, 0, 0));
    }

    #[tokio::test]
    async fn test_unrecognized_slot_type_never_fetches() {
        let api = Arc::new(FakeApi::default().with_slot(slot(42, "Real Level")));
        let cache = Arc::new(PresenceCache::new());
        let slots = resolver(&api, &cache);

        let status = in_room(SlotType::from(99), 42, vec![1]);
        let unknown = slots.resolve(None, Some(&status)).await.unwrap().unwrap();

        assert_eq!(unknown.id, Placeholder::Unknown.reserved_id());
        assert_eq!(api.requests(), (0, 0, 0));
    }

    #[tokio::test]
    async fn test_each_system_state_gets_its_own_entry() {
        let api = Arc::new(FakeApi::default());
        let cache = Arc::new(PresenceCache::new());
        let slots = resolver(&api, &cache);

        for slot_type in [SlotType::Developer, SlotType::Moon, SlotType::Local] {
            slots
                .resolve(None, Some(&in_room(slot_type, 1, vec![1])))
                .await
                .unwrap();
        }
        slots.resolve(None, None).await.unwrap();

        assert_eq!(cache.slot_count(), 4);
        let moon = cache
            .slot(&SlotKey::Placeholder(Placeholder::Moon))
            .await
            .flatten()
            .unwrap();
        assert_eq!(moon.name, Placeholder::Moon.label());
    }
}
