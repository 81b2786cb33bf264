//! Partner dashboard: tab state plus the rooms and operations boards

pub mod operations;
pub mod rooms;
pub mod sequencing;
pub mod tabs;

pub use operations::OperationsBoard;
pub use rooms::RoomsBoard;
pub use sequencing::{ResponseSequencer, Ticket};
pub use tabs::{BookingsSummary, Dashboard, DashboardTab, RevenueSummary};
