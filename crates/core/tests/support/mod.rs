//! Shared test helpers for `partnerdesk-core` integration tests.
//!
//! `FakeBackend` behaves like a small in-memory partner backend so flow and
//! board tests can assert on state changes and on which calls were made.

#![allow(dead_code)]

pub mod backend;

pub use backend::{FakeBackend, MemoryPhones};

use partnerdesk_domain::{Room, RoomStatus, RoomType};

/// Room type named `name` with rooms `start..start + count`, all `status`.
pub fn room_type(name: &str, start: u32, count: u32, status: RoomStatus) -> RoomType {
    RoomType {
        id: None,
        name: name.to_string(),
        hourly_price: 499.0,
        room_count: count,
        rooms: (start..start + count).map(|n| Room::new(n.to_string(), status)).collect(),
        photos: Vec::new(),
    }
}
