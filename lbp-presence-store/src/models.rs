use arrayvec::ArrayString;
use serde::{Deserialize, Deserializer};

use crate::error::{Result, StoreError};

/// Online id of a player - max 16 characters, stored inline (no heap allocation).
pub type PlayerName = ArrayString<16>;

/// Parse a player name into its inline form.
pub fn player_name(name: &str) -> Result<PlayerName> {
  if name.is_empty() {
    return Err(StoreError::PlayerNameEmpty);
  }
  PlayerName::try_from(name).map_err(|_| StoreError::PlayerNameTooLong(name.len()))
}

/// A registered player, as returned by `/api/v1/username/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
  /// Server-assigned id
  pub user_id: i64,
  pub username: String,
  /// Icon shown next to the player's name
  #[serde(default, deserialize_with = "null_as_empty")]
  pub yay_hash: String,
  /// Icon used for locations that have no artwork of their own
  #[serde(default, deserialize_with = "null_as_empty")]
  pub meh_hash: String,
  /// Milliseconds since the Unix epoch
  #[serde(default)]
  pub last_login: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "i32")]
pub enum StatusType {
  #[default]
  Offline,
  Online,
  /// A value this client does not know about
  Unknown,
}

impl From<i32> for StatusType {
  fn from(value: i32) -> Self {
    match value {
      0 => StatusType::Offline,
      1 => StatusType::Online,
      _ => StatusType::Unknown,
    }
  }
}

/// What kind of content a room is attached to.
///
/// Only `User` refers to something the server can describe; every other
/// variant is a system state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "i32")]
pub enum SlotType {
  Developer,
  User,
  Moon,
  Unknown,
  Pod,
  Local,
  DeveloperAdventure,
  Dlc,
}

impl From<i32> for SlotType {
  fn from(value: i32) -> Self {
    match value {
      0 => SlotType::Developer,
      1 => SlotType::User,
      2 => SlotType::Moon,
      5 => SlotType::Pod,
      6 => SlotType::Local,
      7 => SlotType::DeveloperAdventure,
      8 => SlotType::Dlc,
      // 3 and 4 are both unknown on the server side
      _ => SlotType::Unknown,
    }
  }
}

/// Live state of a player, as returned by `/api/v1/user/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStatus {
  #[serde(default)]
  pub status_type: StatusType,
  #[serde(default)]
  pub current_room: Option<Room>,
}

impl LiveStatus {
  pub fn room_slot(&self) -> Option<&RoomSlot> {
    self.current_room.as_ref().and_then(|room| room.slot.as_ref())
  }

  pub fn slot_type(&self) -> Option<SlotType> {
    self.room_slot().map(|slot| slot.slot_type)
  }
}

/// A multiplayer session the player currently occupies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
  #[serde(default)]
  pub room_id: i64,
  /// Ids of everyone in the room, host first
  #[serde(default)]
  pub player_ids: Vec<i64>,
  #[serde(default)]
  pub slot: Option<RoomSlot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSlot {
  pub slot_type: SlotType,
  #[serde(default)]
  pub slot_id: i64,
}

/// A resolved location: either a level fetched from `/api/v1/slot/{id}` or a
/// placeholder standing in for a system state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
  #[serde(rename = "slotId")]
  pub id: i64,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub name: String,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub icon_hash: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
