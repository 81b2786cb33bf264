//! Domain types and models
//!
//! Wire shapes follow the backend's camelCase JSON; Rust fields are
//! snake_case.

pub mod auth;
pub mod envelope;
pub mod hotel;
pub mod session;
pub mod upload;

pub use auth::{
    AuthenticatedUser, Credentials, HotelProfile, PhoneRequest, RefreshRequest, RefreshResponse,
    Role,
};
pub use envelope::{Acknowledgement, ApiEnvelope};
pub use hotel::{
    BulkStatusRequest, HotelSettings, HotelStatusRequest, Room, RoomStatus, RoomStatusRequest,
    RoomType, RoomTypesPayload, RoomUpdate, StatusCounts,
};
pub use session::{StoredSession, TokenPair};
pub use upload::{FileAttachment, HotelRegistration, NewRoomType, UploadForm};
