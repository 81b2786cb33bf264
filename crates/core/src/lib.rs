//! # PartnerDesk Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the partner backend and session storage
//! - Headless login and registration flows
//! - Dashboard tab state plus the rooms and operations boards
//! - Form validation rules
//!
//! ## Architecture Principles
//! - Only depends on `partnerdesk-common` and `partnerdesk-domain`
//! - No HTTP, filesystem or keychain code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod notice;
pub mod session;
pub mod validation;

pub use api::ports::{no_progress, PartnerApi, ProgressCallback};
pub use auth::{LoginFlow, LoginMode, LoginStep, RegistrationFlow, RegistrationState};
pub use dashboard::{
    Dashboard, DashboardTab, OperationsBoard, ResponseSequencer, RoomsBoard, Ticket,
};
pub use notice::{Notice, NoticeKind};
pub use session::ports::{PhoneMemory, SessionStore};
