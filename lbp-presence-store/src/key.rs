//! Cache identity for resolved locations.
//!
//! Real levels are keyed by their server id. System states have no server
//! identity, so each gets a placeholder kind with a reserved negative id.

use crate::models::{RoomSlot, SlotType};

/// A system state that stands in for a location the server cannot describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// Not in any room: menus, offline, loading.
    Menu,
    Story,
    StoryAdventure,
    Moon,
    Pod,
    Local,
    Dlc,
    Unknown,
}

impl Placeholder {
    pub const ALL: [Placeholder; 8] = [
        Placeholder::Menu,
        Placeholder::Story,
        Placeholder::StoryAdventure,
        Placeholder::Moon,
        Placeholder::Pod,
        Placeholder::Local,
        Placeholder::Dlc,
        Placeholder::Unknown,
    ];

    /// Map a room's slot type to its placeholder. `None` slot type means no
    /// room at all; user-created levels have a server identity and return `None`.
    pub fn for_slot_type(slot_type: Option<SlotType>) -> Option<Self> {
        let placeholder = match slot_type {
            None => Placeholder::Menu,
            Some(SlotType::User) => return None,
            Some(SlotType::Developer) => Placeholder::Story,
            Some(SlotType::DeveloperAdventure) => Placeholder::StoryAdventure,
            Some(SlotType::Moon) => Placeholder::Moon,
            Some(SlotType::Pod) => Placeholder::Pod,
            Some(SlotType::Local) => Placeholder::Local,
            Some(SlotType::Dlc) => Placeholder::Dlc,
            Some(SlotType::Unknown) => Placeholder::Unknown,
        };
        Some(placeholder)
    }

    /// Id given to the synthesized slot. Never positive, so it cannot be
    /// mistaken for a level id.
    pub const fn reserved_id(self) -> i64 {
        match self {
            Placeholder::Menu => -1,
            Placeholder::Story => -2,
            Placeholder::StoryAdventure => -3,
            Placeholder::Moon => -4,
            Placeholder::Pod => -5,
            Placeholder::Local => -6,
            Placeholder::Dlc => -7,
            Placeholder::Unknown => -8,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Placeholder::Menu => "In the menus",
            Placeholder::Story => "Playing story mode",
            Placeholder::StoryAdventure => "Playing a story adventure",
            Placeholder::Moon => "Creating on the Moon",
            Placeholder::Pod => "Relaxing in the Pod",
            Placeholder::Local => "Playing a local level",
            Placeholder::Dlc => "Playing DLC content",
            Placeholder::Unknown => "Somewhere unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKey {
    /// A user-created level with its server id.
    Level(i64),
    Placeholder(Placeholder),
}

impl SlotKey {
    /// Derive the key for the slot a room is attached to. `None` means the
    /// player is not in a room.
    pub fn for_room(room_slot: Option<&RoomSlot>) -> Self {
        match Placeholder::for_slot_type(room_slot.map(|slot| slot.slot_type)) {
            Some(placeholder) => SlotKey::Placeholder(placeholder),
            // only user levels land here, and those always carry a room slot
            None => SlotKey::Level(room_slot.map_or(0, |slot| slot.slot_id)),
        }
    }
}
