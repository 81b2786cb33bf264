//! # PartnerDesk Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Configuration loading (defaults, TOML/JSON files, environment)
//! - The JSON request client and the multipart upload client
//! - Token storage and refresh
//! - Session storage backends (file, keychain, memory)
//! - The HTTP implementation of `PartnerApi`
//!
//! ## Architecture
//! - Implements traits defined in `partnerdesk-core`
//! - Depends on `partnerdesk-domain` and `partnerdesk-common`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod api;
pub mod attachments;
pub mod auth;
pub mod config;
pub mod errors;
pub mod http;
pub mod storage;

// Re-export commonly used items
pub use api::HotelApiClient;
pub use attachments::{load_attachment, load_attachments};
pub use auth::{RefreshCoordinator, RefreshState, TokenStore};
pub use errors::InfraError;
pub use http::{RequestClient, RequestClientBuilder, RequestDescriptor, UploadClient};
pub use storage::{
    default_session_path, open_session_store, FileSessionStore, KeychainSessionStore,
    MemorySessionStore,
};
