//! # PartnerDesk App
//!
//! Command line application layer - commands and main entry point.
//!
//! This crate contains:
//! - The `partnerdesk` command line definition
//! - Command handlers driving the core flows and boards
//! - Application context (dependency injection)
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Turns command line arguments into flow and board calls

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

pub use cli::{Cli, Commands};
pub use context::*;

use partnerdesk_domain::Config;

/// Apply command line overrides on top of a loaded configuration.
pub fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(url) = cli.api_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        config.api.base_url = url.to_string();
    }
}

/// Run one parsed command against `ctx`, returning what to print.
pub async fn dispatch(ctx: &AppContext, command: &Commands) -> partnerdesk_domain::Result<String> {
    match command {
        Commands::CheckHotel { phone } => commands::check_hotel(ctx, phone.as_deref()).await,
        Commands::SetPassword { phone, password } => {
            commands::set_password(ctx, phone.as_deref(), password).await
        }
        Commands::Login { phone, password, admin } => {
            commands::login(ctx, phone.as_deref(), password, *admin).await
        }
        Commands::Logout => commands::logout(ctx).await,
        Commands::Register(args) => commands::register(ctx, args).await,
        Commands::Settings(hotel) => commands::settings(ctx, &hotel.hotel_id).await,
        Commands::HotelStatus { hotel, action } => {
            commands::hotel_status(ctx, &hotel.hotel_id, *action).await
        }
        Commands::AddRoomType { hotel, name, hourly_price, room_count, photos } => {
            commands::add_room_type(ctx, &hotel.hotel_id, name, *hourly_price, *room_count, photos)
                .await
        }
        Commands::AddPhotos { hotel, room_type, photos } => {
            commands::add_photos(ctx, &hotel.hotel_id, room_type, photos).await
        }
        Commands::DeleteRoomType { hotel, room_type } => {
            commands::delete_room_type(ctx, &hotel.hotel_id, room_type).await
        }
        Commands::RoomStatus { hotel, room, status } => {
            commands::room_status(ctx, &hotel.hotel_id, room, *status).await
        }
        Commands::BulkStatus { hotel, room_type, status } => {
            commands::bulk_status(ctx, &hotel.hotel_id, room_type, *status).await
        }
        Commands::Whoami => commands::whoami(ctx).await,
    }
}
