//! Partner authentication and onboarding flows

pub mod login_flow;
pub mod registration_flow;

pub use login_flow::{LoginFlow, LoginMode, LoginStep};
pub use registration_flow::{RegistrationFlow, RegistrationState};
