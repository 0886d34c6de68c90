//! Builds the "now playing" payload from whatever the resolvers found.
//!
//! Everything here is pure and total: missing inputs turn into fallback text
//! or empty fields, never an error.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use lbp_presence_store::{LiveStatus, Placeholder, Player, Slot, SlotType, StatusType};

/// Rooms hold at most four players.
pub const PARTY_MAX: u32 = 4;

/// Path under the server root where icon hashes are served.
const ASSET_PATH: &str = "/gameAssets/";

const UNKNOWN_LEVEL: &str = "Unknown level";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    /// `room:{user id}:{room id}`
    pub id: String,
    pub size: u32,
    pub max: u32,
}

/// What gets shown on the presence sink for one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresencePayload {
    /// Status line, e.g. "Online with 1 other player"
    pub details: String,
    /// Location line, e.g. the level name
    pub state: String,
    pub large_image: String,
    pub large_text: String,
    pub small_image: String,
    pub small_text: String,
    /// When the player last logged in
    pub start: SystemTime,
    pub party: Party,
}

pub fn synthesize(
    server_url: &str,
    player: Option<&Player>,
    status: Option<&LiveStatus>,
    slot: Option<&Slot>,
) -> PresencePayload {
    let room = status.and_then(|s| s.current_room.as_ref());
    let status_type = status.map(|s| s.status_type);
    let slot_type = status.and_then(LiveStatus::slot_type);

    let party_id = format!(
        "room:{}:{}",
        player.map(|p| p.user_id.to_string()).unwrap_or_default(),
        room.map(|r| r.room_id.to_string()).unwrap_or_default(),
    );
    let party_size = room.map_or(0, |r| u32::try_from(r.player_ids.len()).unwrap_or(u32::MAX));

    PresencePayload {
        details: status_line(status_type, status),
        state: location_line(slot_type, slot),
        large_image: icon_url(server_url, slot.map(|s| s.icon_hash.as_str())),
        large_text: slot.map(|s| s.name.clone()).unwrap_or_default(),
        small_image: icon_url(server_url, player.map(|p| p.yay_hash.as_str())),
        small_text: player.map(|p| p.username.clone()).unwrap_or_default(),
        start: login_time(player.map_or(0, |p| p.last_login)),
        party: Party {
            id: party_id,
            size: party_size,
            max: PARTY_MAX,
        },
    }
}

/// First line of the presence. A missing status reads as offline.
pub fn status_line(status_type: Option<StatusType>, status: Option<&LiveStatus>) -> String {
    let occupants = status
        .and_then(|s| s.current_room.as_ref())
        .map(|room| room.player_ids.len());

    match status_type {
        None | Some(StatusType::Offline) => "Offline".to_string(),
        Some(StatusType::Unknown) => "Status unknown".to_string(),
        Some(StatusType::Online) => match occupants {
            None => "Online".to_string(),
            Some(0 | 1) => "Online (solo)".to_string(),
            Some(2) => "Online with 1 other player".to_string(),
            Some(n) => format!("Online with {} other players", n - 1),
        },
    }
}

/// Second line of the presence. User levels show their name, system states
/// their placeholder label.
pub fn location_line(slot_type: Option<SlotType>, slot: Option<&Slot>) -> String {
    match Placeholder::for_slot_type(slot_type) {
        Some(placeholder) => placeholder.label().to_string(),
        None => slot
            .map(|s| s.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_LEVEL)
            .to_string(),
    }
}

fn icon_url(server_url: &str, hash: Option<&str>) -> String {
    match hash {
        Some(hash) if !hash.is_empty() => format!("{server_url}{ASSET_PATH}{hash}"),
        _ => String::new(),
    }
}

/// `last_login` is milliseconds since the Unix epoch; anything negative is
/// clamped to the epoch.
fn login_time(last_login: i64) -> SystemTime {
    UNIX_EPOCH + Duration::from_millis(u64::try_from(last_login).unwrap_or(0))
}
