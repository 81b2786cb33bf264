//! Room status commands

use partnerdesk_core::RoomsBoard;
use partnerdesk_domain::{Result, RoomStatus};

use super::operations::render_room_types;
use crate::context::AppContext;
use crate::utils::execute_logged;

pub async fn room_status(
    ctx: &AppContext,
    hotel_id: &str,
    room: &str,
    status: RoomStatus,
) -> Result<String> {
    execute_logged("rooms::room_status", move || async move {
        let board = RoomsBoard::new(ctx.partner_api(), hotel_id);
        board.set_room_status(room, status).await?;
        Ok(format!("Room {room} is now {status}"))
    })
    .await
}

/// Load the room type's rooms, then set all of them to `status`.
pub async fn bulk_status(
    ctx: &AppContext,
    hotel_id: &str,
    room_type: &str,
    status: RoomStatus,
) -> Result<String> {
    execute_logged("rooms::bulk_status", move || async move {
        let board = RoomsBoard::new(ctx.partner_api(), hotel_id);
        board.load().await?;
        let count = board.set_all_rooms(room_type, status).await?;
        Ok(format!(
            "{count} {room_type} rooms set to {status}\n{}",
            render_room_types(&board.room_types())
        ))
    })
    .await
}
