mod cache;
mod error;
mod key;
mod models;

pub use cache::PresenceCache;
pub use error::{Result, StoreError};
pub use key::{Placeholder, SlotKey};
pub use models::{
    LiveStatus, Player, PlayerName, Room, RoomSlot, Slot, SlotType, StatusType, player_name,
};
