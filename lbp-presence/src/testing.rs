//! Fakes shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use lbp_presence_store::{LiveStatus, Player, Room, RoomSlot, Slot, SlotType, StatusType};

use crate::api::LighthouseApi;
use crate::error::ApiError;
use crate::presence::PresencePayload;
use crate::sink::PresenceSink;

pub(crate) fn player(user_id: i64, name: &str) -> Player {
    Player {
        user_id,
        username: name.to_string(),
        yay_hash: format!("{name}-yay"),
        meh_hash: format!("{name}-meh"),
        last_login: 0,
    }
}

pub(crate) fn slot(id: i64, name: &str) -> Slot {
    Slot {
        id,
        name: name.to_string(),
        icon_hash: format!("icon-{id}"),
    }
}

pub(crate) fn offline() -> LiveStatus {
    LiveStatus {
        status_type: StatusType::Offline,
        current_room: None,
    }
}

pub(crate) fn in_room(slot_type: SlotType, slot_id: i64, player_ids: Vec<i64>) -> LiveStatus {
    LiveStatus {
        status_type: StatusType::Online,
        current_room: Some(Room {
            room_id: 900,
            player_ids,
            slot: Some(RoomSlot { slot_type, slot_id }),
        }),
    }
}

pub(crate) fn unreachable() -> ApiError {
    ApiError::Unreachable {
        url: "https://lighthouse.test/api/v1".to_string(),
        reason: "connection refused".to_string(),
    }
}

fn not_found(path: String) -> ApiError {
    ApiError::Status {
        url: format!("https://lighthouse.test/api/v1/{path}"),
        status: 404,
    }
}

/// In-memory server. Anything not registered answers 404.
#[derive(Default)]
pub(crate) struct FakeApi {
    players: Mutex<HashMap<String, Result<Player, ApiError>>>,
    statuses: Mutex<HashMap<i64, Result<LiveStatus, ApiError>>>,
    slots: Mutex<HashMap<i64, Result<Slot, ApiError>>>,
    pub(crate) player_requests: AtomicUsize,
    pub(crate) status_requests: AtomicUsize,
    pub(crate) slot_requests: AtomicUsize,
}

impl FakeApi {
    pub(crate) fn with_player(self, player: Player) -> Self {
        self.players
            .lock()
            .unwrap()
            .insert(player.username.clone(), Ok(player));
        self
    }

    pub(crate) fn with_status(self, user_id: i64, status: LiveStatus) -> Self {
        self.set_status(user_id, Ok(status));
        self
    }

    pub(crate) fn with_slot(self, slot: Slot) -> Self {
        self.slots.lock().unwrap().insert(slot.id, Ok(slot));
        self
    }

    pub(crate) fn set_player(&self, name: &str, result: Result<Player, ApiError>) {
        self.players.lock().unwrap().insert(name.to_string(), result);
    }

    pub(crate) fn set_status(&self, user_id: i64, result: Result<LiveStatus, ApiError>) {
        self.statuses.lock().unwrap().insert(user_id, result);
    }

    pub(crate) fn set_slot(&self, slot_id: i64, result: Result<Slot, ApiError>) {
        self.slots.lock().unwrap().insert(slot_id, result);
    }

    pub(crate) fn requests(&self) -> (usize, usize, usize) {
        (
            self.player_requests.load(Ordering::SeqCst),
            self.status_requests.load(Ordering::SeqCst),
            self.slot_requests.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl LighthouseApi for FakeApi {
    async fn player(&self, name: &str) -> Result<Player, ApiError> {
        self.player_requests.fetch_add(1, Ordering::SeqCst);
        self.players
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(not_found(format!("username/{name}"))))
    }

    async fn status(&self, user_id: i64) -> Result<LiveStatus, ApiError> {
        self.status_requests.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| Err(not_found(format!("user/{user_id}/status"))))
    }

    async fn slot(&self, slot_id: i64) -> Result<Slot, ApiError> {
        self.slot_requests.fetch_add(1, Ordering::SeqCst);
        self.slots
            .lock()
            .unwrap()
            .get(&slot_id)
            .cloned()
            .unwrap_or_else(|| Err(not_found(format!("slot/{slot_id}"))))
    }
}

/// Sink that remembers everything it was asked to do.
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) published: Mutex<Vec<PresencePayload>>,
    pub(crate) closes: AtomicUsize,
}

impl PresenceSink for RecordingSink {
    fn name(&self) -> &'static str {
        "Recording"
    }

    fn publish(&self, payload: &PresencePayload) {
        self.published.lock().unwrap().push(payload.clone());
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
