//! Hotel registration submission

use std::sync::Arc;

use partnerdesk_domain::{HotelRegistration, PartnerDeskError, Result};
use serde_json::Value;
use tracing::{info, warn};

use crate::api::ports::{PartnerApi, ProgressCallback};
use crate::validation::validate_registration;

pub const SUBMITTED_MESSAGE: &str = "Your details have been received and are under review. \
                                     We will finish verification and reach out in 2 business days.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegistrationState {
    #[default]
    Filling,
    Submitting,
    Submitted,
}

/// `Filling -> Submitting -> Submitted`. Any failure lands back in `Filling`
/// with the error kept for display.
pub struct RegistrationFlow {
    api: Arc<dyn PartnerApi>,
    state: RegistrationState,
    error: Option<String>,
}

impl RegistrationFlow {
    pub fn new(api: Arc<dyn PartnerApi>) -> Self {
        Self { api, state: RegistrationState::Filling, error: None }
    }

    pub fn state(&self) -> RegistrationState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate and upload the registration, forwarding upload progress.
    pub async fn submit(
        &mut self,
        registration: &HotelRegistration,
        progress: ProgressCallback,
    ) -> Result<()> {
        if self.state != RegistrationState::Filling {
            return Err(PartnerDeskError::Internal(format!(
                "registration cannot be submitted while {:?}",
                self.state
            )));
        }
        self.error = None;

        let registration = validate_registration(registration).map_err(|err| self.fail(err))?;

        self.state = RegistrationState::Submitting;
        let body = self
            .api
            .register_hotel(&registration, progress)
            .await
            .and_then(accepted)
            .map_err(|err| self.fail(err))?;

        info!(hotel = %registration.name, response = %body, "registration submitted");
        self.state = RegistrationState::Submitted;
        Ok(())
    }

    fn fail(&mut self, err: PartnerDeskError) -> PartnerDeskError {
        warn!(error = %err, "registration not submitted");
        self.state = RegistrationState::Filling;
        self.error = Some(err.to_string());
        err
    }
}

/// A 2xx body is accepted unless it is an envelope saying `success: false`.
fn accepted(body: Value) -> Result<Value> {
    match body.get("success").and_then(Value::as_bool) {
        Some(false) => {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or("Error submitting form");
            Err(PartnerDeskError::Rejected(message.to_string()))
        }
        _ => Ok(body),
    }
}
