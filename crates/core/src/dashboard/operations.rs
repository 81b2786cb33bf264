//! Hotel operations board: open/closed toggle and room-type management
//!
//! The open/closed flag and the room-type list are updated by unrelated calls,
//! so each is sequenced on its own.

use std::sync::Arc;

use parking_lot::RwLock;
use partnerdesk_domain::{FileAttachment, NewRoomType, Result, RoomType};
use tracing::{debug, info};

use crate::api::ports::{PartnerApi, ProgressCallback};
use crate::api::{require_data, require_success};
use crate::dashboard::sequencing::{ResponseSequencer, Ticket};
use crate::validation::{validate_new_room_type, validate_photos};

#[derive(Debug, Clone, PartialEq)]
struct OperationsState {
    hotel_open: bool,
    room_types: Vec<RoomType>,
}

pub struct OperationsBoard {
    api: Arc<dyn PartnerApi>,
    hotel_id: String,
    state: RwLock<OperationsState>,
    status_sequencer: ResponseSequencer,
    room_types_sequencer: ResponseSequencer,
}

impl OperationsBoard {
    pub fn new(api: Arc<dyn PartnerApi>, hotel_id: impl Into<String>) -> Self {
        Self {
            api,
            hotel_id: hotel_id.into(),
            state: RwLock::new(OperationsState { hotel_open: true, room_types: Vec::new() }),
            status_sequencer: ResponseSequencer::new(),
            room_types_sequencer: ResponseSequencer::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.read().hotel_open
    }

    pub fn room_types(&self) -> Vec<RoomType> {
        self.state.read().room_types.clone()
    }

    pub async fn load(&self) -> Result<()> {
        let status_ticket = self.status_sequencer.issue();
        let room_types_ticket = self.room_types_sequencer.issue();
        let envelope = self.api.hotel_settings(&self.hotel_id).await?;
        let settings = require_data(envelope, "Error loading hotel settings")?;

        self.apply_open(status_ticket, settings.hotel_status);
        self.replace(room_types_ticket, settings.room_types);
        Ok(())
    }

    pub async fn set_open(&self, open: bool) -> Result<()> {
        let ticket = self.status_sequencer.issue();
        let ack = self.api.update_hotel_status(&self.hotel_id, open).await?;
        require_success(ack, "Error updating hotel status")?;

        self.apply_open(ticket, open);
        info!(hotel_id = %self.hotel_id, open, "hotel status updated");
        Ok(())
    }

    /// Flip the open/closed status, returning the new value.
    pub async fn toggle_open(&self) -> Result<bool> {
        let open = !self.is_open();
        self.set_open(open).await?;
        Ok(open)
    }

    pub async fn add_room_type(
        &self,
        room_type: &NewRoomType,
        progress: ProgressCallback,
    ) -> Result<()> {
        validate_new_room_type(room_type)?;

        let ticket = self.room_types_sequencer.issue();
        let envelope = self.api.add_room_type(&self.hotel_id, room_type, progress).await?;
        let payload = require_data(envelope, "Error adding room type")?;
        self.replace(ticket, payload.room_types);
        Ok(())
    }

    pub async fn add_photos(
        &self,
        room_type_name: &str,
        photos: &[FileAttachment],
        progress: ProgressCallback,
    ) -> Result<()> {
        validate_photos(photos)?;

        let ticket = self.room_types_sequencer.issue();
        let envelope = self
            .api
            .add_room_type_photos(&self.hotel_id, room_type_name, photos, progress)
            .await?;
        let payload = require_data(envelope, "Error adding photos")?;
        self.replace(ticket, payload.room_types);
        Ok(())
    }

    pub async fn delete_room_type(&self, room_type_name: &str) -> Result<()> {
        let ticket = self.room_types_sequencer.issue();
        let envelope = self.api.delete_room_type(&self.hotel_id, room_type_name).await?;
        let payload = require_data(envelope, "Error deleting room type")?;
        self.replace(ticket, payload.room_types);
        Ok(())
    }

    fn apply_open(&self, ticket: Ticket, open: bool) {
        let mut state = self.state.write();
        if self.status_sequencer.try_apply(ticket) {
            state.hotel_open = open;
        } else {
            debug!(ticket = ticket.value(), "discarding stale hotel status");
        }
    }

    fn replace(&self, ticket: Ticket, room_types: Vec<RoomType>) {
        if self.room_types_sequencer.try_apply(ticket) {
            self.state.write().room_types = room_types;
        } else {
            debug!(ticket = ticket.value(), "discarding stale room types");
        }
    }
}
