//! Hotel operations: room types, rooms and their statuses

use partnerdesk_common::utils::serde::string_or_number;
use serde::{Deserialize, Serialize};

/// Occupancy status of a single room. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Vacant,
    Booked,
    Maintenance,
}

crate::impl_domain_status_conversions!(RoomStatus {
    Vacant => "vacant",
    Booked => "booked",
    Maintenance => "maintenance",
});

impl RoomStatus {
    pub const ALL: [RoomStatus; 3] = [Self::Vacant, Self::Booked, Self::Maintenance];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique within the hotel. The backend sends numbers or strings.
    #[serde(with = "string_or_number")]
    pub room_number: String,
    #[serde(default)]
    pub status: RoomStatus,
}

impl Room {
    pub fn new(room_number: impl Into<String>, status: RoomStatus) -> Self {
        Self { room_number: room_number.into(), status }
    }
}

/// Per-status room tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub vacant: usize,
    pub booked: usize,
    pub maintenance: usize,
}

impl StatusCounts {
    pub fn get(&self, status: RoomStatus) -> usize {
        match status {
            RoomStatus::Vacant => self.vacant,
            RoomStatus::Booked => self.booked,
            RoomStatus::Maintenance => self.maintenance,
        }
    }

    pub fn total(&self) -> usize {
        self.vacant + self.booked + self.maintenance
    }
}

impl<'a> FromIterator<&'a Room> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = &'a Room>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut counts, room| {
            match room.status {
                RoomStatus::Vacant => counts.vacant += 1,
                RoomStatus::Booked => counts.booked += 1,
                RoomStatus::Maintenance => counts.maintenance += 1,
            }
            counts
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Unique per hotel.
    pub name: String,
    pub hourly_price: f64,
    pub room_count: u32,
    #[serde(default)]
    pub rooms: Vec<Room>,
    /// Photo URLs.
    #[serde(default)]
    pub photos: Vec<String>,
}

impl RoomType {
    pub fn status_counts(&self) -> StatusCounts {
        self.rooms.iter().collect()
    }

    pub fn room(&self, room_number: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.room_number == room_number)
    }
}

/// `data` of `GET /hotel-operations/:hotelId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSettings {
    #[serde(default = "default_open")]
    pub hotel_status: bool,
    #[serde(default)]
    pub room_types: Vec<RoomType>,
}

fn default_open() -> bool {
    true
}

/// `data` of every room-type mutation and of the bulk status update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypesPayload {
    #[serde(default)]
    pub room_types: Vec<RoomType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    #[serde(with = "string_or_number")]
    pub room_number: String,
    pub status: RoomStatus,
}

impl RoomUpdate {
    pub fn new(room_number: impl Into<String>, status: RoomStatus) -> Self {
        Self { room_number: room_number.into(), status }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusRequest {
    pub room_updates: Vec<RoomUpdate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelStatusRequest {
    pub hotel_status: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStatusRequest {
    pub status: RoomStatus,
}
