//! Conversions from external infrastructure errors into domain errors.

use std::io::Error as IoError;

use keyring::Error as KeyringError;
use partnerdesk_domain::PartnerDeskError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PartnerDeskError);

impl From<InfraError> for PartnerDeskError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PartnerDeskError> for InfraError {
    fn from(value: PartnerDeskError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPartnerDeskError {
    fn into_partnerdesk(self) -> PartnerDeskError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → PartnerDeskError */
/* -------------------------------------------------------------------------- */

impl IntoPartnerDeskError for KeyringError {
    fn into_partnerdesk(self) -> PartnerDeskError {
        use KeyringError::*;

        let description = self.to_string();

        match self {
            NoEntry => PartnerDeskError::Storage("keychain entry not found".into()),
            BadEncoding(_) => {
                PartnerDeskError::Storage("session in keychain is not valid UTF-8".into())
            }
            TooLong(name, limit) => PartnerDeskError::Storage(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            Invalid(attr, reason) => {
                PartnerDeskError::Storage(format!("keychain attribute '{attr}' is invalid: {reason}"))
            }
            Ambiguous(entries) => PartnerDeskError::Storage(format!(
                "multiple keychain entries matched request ({} results)",
                entries.len()
            )),
            PlatformFailure(err) => {
                PartnerDeskError::Storage(format!("keychain platform error: {err}"))
            }
            NoStorageAccess(err) => {
                PartnerDeskError::Storage(format!("unable to access secure storage: {err}"))
            }
            _ => PartnerDeskError::Storage(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_partnerdesk())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PartnerDeskError */
/* -------------------------------------------------------------------------- */

impl IntoPartnerDeskError for HttpError {
    fn into_partnerdesk(self) -> PartnerDeskError {
        if self.is_timeout() {
            return PartnerDeskError::Timeout;
        }

        if self.is_connect() {
            return PartnerDeskError::Network("connection failed".into());
        }

        if self.is_decode() {
            return PartnerDeskError::Decode(self.to_string());
        }

        if self.is_builder() {
            return PartnerDeskError::Internal(format!("malformed request: {self}"));
        }

        if let Some(status) = self.status() {
            return PartnerDeskError::http(status.as_u16(), None);
        }

        PartnerDeskError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_partnerdesk())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io / serde_json / toml → PartnerDeskError */
/* -------------------------------------------------------------------------- */

impl IntoPartnerDeskError for IoError {
    fn into_partnerdesk(self) -> PartnerDeskError {
        PartnerDeskError::Storage(format!("{:?}: {self}", self.kind()))
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_partnerdesk())
    }
}

impl IntoPartnerDeskError for JsonError {
    fn into_partnerdesk(self) -> PartnerDeskError {
        PartnerDeskError::Decode(self.to_string())
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_partnerdesk())
    }
}

impl IntoPartnerDeskError for toml::de::Error {
    fn into_partnerdesk(self) -> PartnerDeskError {
        PartnerDeskError::Config(format!("invalid TOML: {}", self.to_string().trim()))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(value.into_partnerdesk())
    }
}

impl IntoPartnerDeskError for url::ParseError {
    fn into_partnerdesk(self) -> PartnerDeskError {
        PartnerDeskError::Config(format!("invalid URL: {self}"))
    }
}

impl From<url::ParseError> for InfraError {
    fn from(value: url::ParseError) -> Self {
        InfraError(value.into_partnerdesk())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
