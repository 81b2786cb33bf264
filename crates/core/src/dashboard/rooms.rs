//! Room status board
//!
//! Holds the hotel's room types and applies server confirmed status changes.
//! A single room update is patched locally once the server accepts it; a bulk
//! update replaces every room type with the server's answer and never applies
//! partial client-side state.
//!
//! Wholesale replacements (load, bulk update) are sequenced against each
//! other. Single-room patches are kept until a replacement issued after them
//! lands, and are re-applied on top of any older replacement that arrives
//! late.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use partnerdesk_domain::{PartnerDeskError, Result, RoomStatus, RoomType, RoomUpdate, StatusCounts};
use tracing::{debug, info};

use crate::api::ports::PartnerApi;
use crate::api::{require_data, require_success};
use crate::dashboard::sequencing::{ResponseSequencer, Ticket};
use crate::validation::validate_bulk_updates;

#[derive(Debug, Default)]
struct RoomsState {
    room_types: Vec<RoomType>,
    /// Confirmed single-room changes keyed by room number.
    patches: HashMap<String, (Ticket, RoomStatus)>,
}

fn patch_room(room_types: &mut [RoomType], room_number: &str, status: RoomStatus) {
    room_types
        .iter_mut()
        .flat_map(|rt| rt.rooms.iter_mut())
        .filter(|room| room.room_number == room_number)
        .for_each(|room| room.status = status);
}

pub struct RoomsBoard {
    api: Arc<dyn PartnerApi>,
    hotel_id: String,
    state: RwLock<RoomsState>,
    sequencer: ResponseSequencer,
}

impl RoomsBoard {
    pub fn new(api: Arc<dyn PartnerApi>, hotel_id: impl Into<String>) -> Self {
        Self {
            api,
            hotel_id: hotel_id.into(),
            state: RwLock::new(RoomsState::default()),
            sequencer: ResponseSequencer::new(),
        }
    }

    pub fn hotel_id(&self) -> &str {
        &self.hotel_id
    }

    /// Snapshot of the current room types.
    pub fn room_types(&self) -> Vec<RoomType> {
        self.state.read().room_types.clone()
    }

    /// Per-status counts for one room type.
    pub fn counts(&self, room_type_name: &str) -> Option<StatusCounts> {
        self.state
            .read()
            .room_types
            .iter()
            .find(|rt| rt.name == room_type_name)
            .map(RoomType::status_counts)
    }

    /// Per-status counts across the whole hotel.
    pub fn totals(&self) -> StatusCounts {
        self.state.read().room_types.iter().flat_map(|rt| rt.rooms.iter()).collect()
    }

    pub async fn load(&self) -> Result<()> {
        let ticket = self.sequencer.issue();
        let envelope = self.api.hotel_settings(&self.hotel_id).await?;
        let settings = require_data(envelope, "Error loading room data")?;
        self.replace(ticket, settings.room_types);
        Ok(())
    }

    /// Change one room's status. The local copy changes only after the
    /// server accepts.
    ///
    /// Concurrent updates of different rooms all apply. The patch is dropped
    /// only when a newer update of the same room, or a wholesale replacement
    /// issued after it, has already been applied.
    pub async fn set_room_status(&self, room_number: &str, status: RoomStatus) -> Result<()> {
        let ticket = self.sequencer.issue();
        let ack = self.api.update_room_status(&self.hotel_id, room_number, status).await?;
        require_success(ack, "Error updating room status")?;

        let mut state = self.state.write();
        let newer_patch = state.patches.get(room_number).is_some_and(|(seen, _)| *seen > ticket);
        if newer_patch || self.sequencer.is_superseded(ticket) {
            debug!(ticket = ticket.value(), room_number, "discarding stale room status update");
            return Ok(());
        }
        state.patches.insert(room_number.to_string(), (ticket, status));
        patch_room(&mut state.room_types, room_number, status);
        Ok(())
    }

    /// Set every room of `room_type_name` to `status`.
    ///
    /// Returns how many rooms were submitted.
    pub async fn set_all_rooms(&self, room_type_name: &str, status: RoomStatus) -> Result<usize> {
        let updates: Vec<RoomUpdate> = {
            let state = self.state.read();
            let room_type = state
                .room_types
                .iter()
                .find(|rt| rt.name == room_type_name)
                .ok_or_else(|| {
                    PartnerDeskError::validation(
                        "roomType",
                        format!("Unknown room type: {room_type_name}"),
                    )
                })?;
            room_type
                .rooms
                .iter()
                .map(|room| RoomUpdate::new(room.room_number.clone(), status))
                .collect()
        };
        validate_bulk_updates(&updates)?;

        let ticket = self.sequencer.issue();
        let envelope = self.api.bulk_update_room_status(&self.hotel_id, &updates).await?;
        let payload = require_data(envelope, "Error updating rooms")?;
        self.replace(ticket, payload.room_types);

        info!(
            room_type = room_type_name,
            %status,
            count = updates.len(),
            "bulk status update applied"
        );
        Ok(updates.len())
    }

    fn replace(&self, ticket: Ticket, room_types: Vec<RoomType>) {
        let mut guard = self.state.write();
        if !self.sequencer.try_apply(ticket) {
            debug!(ticket = ticket.value(), "discarding stale room types");
            return;
        }

        let state = &mut *guard;
        state.room_types = room_types;
        state.patches.retain(|_, (patched, _)| *patched > ticket);
        for (room_number, (_, status)) in &state.patches {
            patch_room(&mut state.room_types, room_number, *status);
        }
    }
}
