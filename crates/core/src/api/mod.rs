//! Partner backend port

pub mod ports;

use partnerdesk_domain::{ApiEnvelope, PartnerDeskError, Result};

/// Turn a `success: false` envelope into [`PartnerDeskError::Rejected`].
pub fn require_success<T>(envelope: ApiEnvelope<T>, fallback: &str) -> Result<ApiEnvelope<T>> {
    if envelope.success {
        Ok(envelope)
    } else {
        Err(PartnerDeskError::Rejected(envelope.message_or(fallback).to_string()))
    }
}

/// Payload of a successful envelope, failing when the server omitted it.
pub fn require_data<T>(envelope: ApiEnvelope<T>, fallback: &str) -> Result<T> {
    require_success(envelope, fallback)?
        .data
        .ok_or_else(|| PartnerDeskError::Decode("response is missing `data`".to_string()))
}
