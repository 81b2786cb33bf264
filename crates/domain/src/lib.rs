//! # PartnerDesk Domain
//!
//! Business domain types and models for PartnerDesk.
//!
//! This crate contains:
//! - Wire types for the partner backend (hotels, room types, rooms, sessions)
//! - The `PartnerDeskError` taxonomy and `Result` alias
//! - Configuration structures with their defaults
//! - Domain constants (endpoints, storage keys)
//!
//! ## Architecture
//! - Depends only on `partnerdesk-common` (foundation tier) for validation
//!   errors and serde helpers
//! - No I/O: loading attachments from disk and talking to the backend live
//!   in `partnerdesk-infra`

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
