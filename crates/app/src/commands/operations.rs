//! Hotel operations: open/closed status and room types

use std::fmt::Write;
use std::path::PathBuf;

use partnerdesk_core::OperationsBoard;
use partnerdesk_domain::{NewRoomType, Result, RoomType};
use partnerdesk_infra::load_attachments;

use super::progress_printer;
use crate::cli::HotelAction;
use crate::context::AppContext;
use crate::utils::execute_logged;

/// Hotel status followed by one line per room type.
pub async fn settings(ctx: &AppContext, hotel_id: &str) -> Result<String> {
    execute_logged("operations::settings", move || async move {
        let board = OperationsBoard::new(ctx.partner_api(), hotel_id);
        board.load().await?;
        Ok(render(&board))
    })
    .await
}

pub async fn hotel_status(ctx: &AppContext, hotel_id: &str, action: HotelAction) -> Result<String> {
    execute_logged("operations::hotel_status", move || async move {
        let board = OperationsBoard::new(ctx.partner_api(), hotel_id);
        let open = match action {
            HotelAction::Open => {
                board.set_open(true).await?;
                true
            }
            HotelAction::Close => {
                board.set_open(false).await?;
                false
            }
            HotelAction::Toggle => {
                board.load().await?;
                board.toggle_open().await?
            }
        };
        Ok(format!("Hotel is now {}", open_label(open)))
    })
    .await
}

pub async fn add_room_type(
    ctx: &AppContext,
    hotel_id: &str,
    name: &str,
    hourly_price: f64,
    room_count: u32,
    photos: &[PathBuf],
) -> Result<String> {
    execute_logged("operations::add_room_type", move || async move {
        let room_type = NewRoomType {
            name: name.to_string(),
            hourly_price,
            room_count,
            photos: load_attachments(photos).await?,
        };

        let board = OperationsBoard::new(ctx.partner_api(), hotel_id);
        board.add_room_type(&room_type, progress_printer("Uploading room type")).await?;
        Ok(render_room_types(&board.room_types()))
    })
    .await
}

pub async fn add_photos(
    ctx: &AppContext,
    hotel_id: &str,
    room_type: &str,
    photos: &[PathBuf],
) -> Result<String> {
    execute_logged("operations::add_photos", move || async move {
        let photos = load_attachments(photos).await?;

        let board = OperationsBoard::new(ctx.partner_api(), hotel_id);
        board.add_photos(room_type, &photos, progress_printer("Uploading photos")).await?;
        Ok(render_room_types(&board.room_types()))
    })
    .await
}

pub async fn delete_room_type(ctx: &AppContext, hotel_id: &str, room_type: &str) -> Result<String> {
    execute_logged("operations::delete_room_type", move || async move {
        let board = OperationsBoard::new(ctx.partner_api(), hotel_id);
        board.delete_room_type(room_type).await?;
        Ok(format!("Deleted {room_type}\n{}", render_room_types(&board.room_types())))
    })
    .await
}

fn open_label(open: bool) -> &'static str {
    if open {
        "open"
    } else {
        "closed"
    }
}

fn render(board: &OperationsBoard) -> String {
    format!("Hotel is {}\n{}", open_label(board.is_open()), render_room_types(&board.room_types()))
}

pub(crate) fn render_room_types(room_types: &[RoomType]) -> String {
    if room_types.is_empty() {
        return "No room types".to_string();
    }

    let mut out = String::new();
    for room_type in room_types {
        let counts = room_type.status_counts();
        let _ = writeln!(
            out,
            "{}: {} rooms at {}/hour ({} vacant, {} booked, {} maintenance, {} photos)",
            room_type.name,
            room_type.room_count,
            room_type.hourly_price,
            counts.vacant,
            counts.booked,
            counts.maintenance,
            room_type.photos.len()
        );
    }
    out.truncate(out.trim_end().len());
    out
}
