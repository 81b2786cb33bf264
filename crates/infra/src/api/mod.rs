//! Partner backend façade
//!
//! [`HotelApiClient`] implements the core `PartnerApi` port over the request
//! and upload clients.

pub mod client;

pub use client::HotelApiClient;
