//! Command line definition

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use partnerdesk_domain::RoomStatus;

/// PartnerDesk - manage your hotel on the partner platform
#[derive(Debug, Parser)]
#[command(name = "partnerdesk")]
#[command(about = "Partner portal client for hourly hotel bookings")]
#[command(version)]
#[command(long_about = r#"
PartnerDesk signs hotel partners in and manages their hotel: open/closed
status, room types, room photos and room statuses.

Examples:
  partnerdesk check-hotel --phone 9876543210
  partnerdesk login --phone 9876543210 --password hunter22
  partnerdesk settings --hotel-id 64f1c0
  partnerdesk room-status --hotel-id 64f1c0 --room 101 --status booked
  partnerdesk bulk-status --hotel-id 64f1c0 --room-type Deluxe --status vacant
"#)]
pub struct Cli {
    /// Configuration file (TOML or JSON)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL override
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Look up the hotel registered to a phone number
    CheckHotel {
        /// Hotel phone number (defaults to the remembered one)
        #[arg(long)]
        phone: Option<String>,
    },

    /// Choose the password for a first-time login
    SetPassword {
        #[arg(long)]
        phone: Option<String>,

        #[arg(long, env = "PARTNERDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign in and store the session
    Login {
        #[arg(long)]
        phone: Option<String>,

        #[arg(long, env = "PARTNERDESK_PASSWORD", hide_env_values = true)]
        password: String,

        /// Sign in as a platform administrator
        #[arg(long)]
        admin: bool,
    },

    /// Sign out and discard the stored tokens
    Logout,

    /// Submit a new hotel for onboarding
    Register(RegisterArgs),

    /// Show the hotel's status and room types
    Settings(HotelArg),

    /// Open, close or toggle the hotel
    HotelStatus {
        #[command(flatten)]
        hotel: HotelArg,

        #[arg(value_enum)]
        action: HotelAction,
    },

    /// Add a room type with its photos
    AddRoomType {
        #[command(flatten)]
        hotel: HotelArg,

        #[arg(long)]
        name: String,

        /// Price per hour
        #[arg(long)]
        hourly_price: f64,

        #[arg(long)]
        room_count: u32,

        /// Photo file, repeatable
        #[arg(long = "photo", required = true)]
        photos: Vec<PathBuf>,
    },

    /// Upload more photos for an existing room type
    AddPhotos {
        #[command(flatten)]
        hotel: HotelArg,

        #[arg(long)]
        room_type: String,

        #[arg(long = "photo", required = true)]
        photos: Vec<PathBuf>,
    },

    /// Delete a room type and its rooms
    DeleteRoomType {
        #[command(flatten)]
        hotel: HotelArg,

        #[arg(long)]
        room_type: String,
    },

    /// Change one room's status
    RoomStatus {
        #[command(flatten)]
        hotel: HotelArg,

        #[arg(long)]
        room: String,

        #[arg(long)]
        status: RoomStatus,
    },

    /// Set every room of a room type to one status
    BulkStatus {
        #[command(flatten)]
        hotel: HotelArg,

        #[arg(long)]
        room_type: String,

        #[arg(long)]
        status: RoomStatus,
    },

    /// Show whether a session is stored
    Whoami,
}

#[derive(Debug, Args)]
pub struct HotelArg {
    /// Hotel id returned at login
    #[arg(long, env = "PARTNERDESK_HOTEL_ID")]
    pub hotel_id: String,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub business_address: String,

    /// 15-character GST number
    #[arg(long)]
    pub gst: String,

    /// 12-digit Aadhaar number
    #[arg(long)]
    pub aadhar: String,

    /// Hygiene photo, repeatable
    #[arg(long = "hygiene-pic")]
    pub hygiene_pics: Vec<PathBuf>,

    /// 360 degree view image, repeatable
    #[arg(long = "view360")]
    pub view360: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HotelAction {
    Open,
    Close,
    Toggle,
}
