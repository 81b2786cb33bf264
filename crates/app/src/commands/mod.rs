//! Command handlers
//!
//! Each handler drives one core flow or board against the context's backend
//! client and returns the text to print on stdout.

pub mod auth;
pub mod operations;
pub mod registration;
pub mod rooms;

use std::io::Write;
use std::sync::Arc;

use partnerdesk_core::ProgressCallback;

pub use auth::{check_hotel, login, logout, set_password, whoami};
pub use operations::{add_photos, add_room_type, delete_room_type, hotel_status, settings};
pub use registration::register;
pub use rooms::{bulk_status, room_status};

/// Progress callback drawing a single updating line on stderr.
pub fn progress_printer(label: &'static str) -> ProgressCallback {
    Arc::new(move |percent| {
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r{label}... {percent:>3}%");
        if percent == 100 {
            let _ = writeln!(stderr);
        }
        let _ = stderr.flush();
    })
}
