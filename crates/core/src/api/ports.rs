//! Port interface for the partner backend
//!
//! One method per backend operation. Implementations return the parsed
//! envelope unchanged; turning `success: false` into an error is the
//! caller's decision.

use std::sync::Arc;

use async_trait::async_trait;
use partnerdesk_domain::{
    Acknowledgement, ApiEnvelope, AuthenticatedUser, FileAttachment, HotelProfile,
    HotelRegistration, HotelSettings, NewRoomType, Result, RoomStatus, RoomTypesPayload,
    RoomUpdate,
};

/// Upload progress sink. Receives whole percentages in `0..=100`.
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

/// Progress sink that discards every update.
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Typed access to the partner backend
#[async_trait]
pub trait PartnerApi: Send + Sync {
    /// `POST /auth/check-hotel`
    async fn check_hotel(&self, phone: &str) -> Result<ApiEnvelope<HotelProfile>>;

    /// `POST /auth/set-password`
    async fn set_password(&self, phone: &str, password: &str) -> Result<Acknowledgement>;

    /// `POST /auth/login`; persists the issued tokens on success.
    async fn login(&self, phone: &str, password: &str) -> Result<ApiEnvelope<AuthenticatedUser>>;

    /// `POST /auth/logout`, best effort. The local session is always cleared.
    async fn logout(&self) -> Result<()>;

    /// `POST /hotels/register` (multipart). Returns the raw response body.
    async fn register_hotel(
        &self,
        registration: &HotelRegistration,
        progress: ProgressCallback,
    ) -> Result<serde_json::Value>;

    /// `GET /hotel-operations/:hotelId`
    async fn hotel_settings(&self, hotel_id: &str) -> Result<ApiEnvelope<HotelSettings>>;

    /// `PUT /hotel-operations/:hotelId/status`
    async fn update_hotel_status(&self, hotel_id: &str, open: bool) -> Result<Acknowledgement>;

    /// `POST /hotel-operations/:hotelId/room-types` (multipart)
    async fn add_room_type(
        &self,
        hotel_id: &str,
        room_type: &NewRoomType,
        progress: ProgressCallback,
    ) -> Result<ApiEnvelope<RoomTypesPayload>>;

    /// `POST /hotel-operations/:hotelId/room-types/:name/photos` (multipart)
    async fn add_room_type_photos(
        &self,
        hotel_id: &str,
        room_type_name: &str,
        photos: &[FileAttachment],
        progress: ProgressCallback,
    ) -> Result<ApiEnvelope<RoomTypesPayload>>;

    /// `DELETE /hotel-operations/:hotelId/room-types/:name`
    async fn delete_room_type(
        &self,
        hotel_id: &str,
        room_type_name: &str,
    ) -> Result<ApiEnvelope<RoomTypesPayload>>;

    /// `PUT /hotel-operations/:hotelId/rooms/:roomNumber/status`
    async fn update_room_status(
        &self,
        hotel_id: &str,
        room_number: &str,
        status: RoomStatus,
    ) -> Result<Acknowledgement>;

    /// `PUT /hotel-operations/:hotelId/rooms/bulk-status`
    async fn bulk_update_room_status(
        &self,
        hotel_id: &str,
        updates: &[RoomUpdate],
    ) -> Result<ApiEnvelope<RoomTypesPayload>>;
}
