//! Login state machine for admins and hotel partners
//!
//! Hotel partners go `Initial --check_hotel--> SetPassword | Login`, then
//! `SetPassword --set_password--> Login --login--> Authenticated`. Admins
//! start at `Login`. Failed calls record a message and leave the step where
//! it was.

use std::sync::Arc;

use partnerdesk_domain::{AuthenticatedUser, HotelProfile, PartnerDeskError, Result, Role};
use tracing::{debug, warn};

use crate::api::ports::PartnerApi;
use crate::api::{require_data, require_success};
use crate::notice::Notice;
use crate::session::ports::PhoneMemory;
use crate::validation::{normalize_phone, validate_password};

pub const SET_PASSWORD_PROMPT: &str = "Please set your password for first-time login";
pub const LOGIN_PROMPT: &str = "Please enter your password to login";
pub const PASSWORD_SET_MESSAGE: &str = "Password set successfully! You can now login.";
pub const NOT_ADMIN_MESSAGE: &str = "This account does not have admin access";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginMode {
    Admin,
    #[default]
    HotelPartner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    /// Waiting for the partner's phone number.
    Initial,
    /// First login: the partner must choose a password.
    SetPassword,
    /// Waiting for the password.
    Login,
    Authenticated,
}

impl LoginMode {
    fn first_step(self) -> LoginStep {
        match self {
            Self::Admin => LoginStep::Login,
            Self::HotelPartner => LoginStep::Initial,
        }
    }
}

/// Headless login form
pub struct LoginFlow {
    api: Arc<dyn PartnerApi>,
    phones: Arc<dyn PhoneMemory>,
    mode: LoginMode,
    step: LoginStep,
    phone: Option<String>,
    hotel: Option<HotelProfile>,
    user: Option<AuthenticatedUser>,
    notice: Option<Notice>,
}

impl LoginFlow {
    pub fn new(api: Arc<dyn PartnerApi>, phones: Arc<dyn PhoneMemory>) -> Self {
        Self::with_mode(api, phones, LoginMode::default())
    }

    pub fn with_mode(
        api: Arc<dyn PartnerApi>,
        phones: Arc<dyn PhoneMemory>,
        mode: LoginMode,
    ) -> Self {
        Self {
            api,
            phones,
            mode,
            step: mode.first_step(),
            phone: None,
            hotel: None,
            user: None,
            notice: None,
        }
    }

    pub fn mode(&self) -> LoginMode {
        self.mode
    }

    pub fn step(&self) -> LoginStep {
        self.step
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn hotel(&self) -> Option<&HotelProfile> {
        self.hotel.as_ref()
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Switch between admin and hotel-partner login, discarding progress.
    pub fn switch_mode(&mut self, mode: LoginMode) {
        self.mode = mode;
        self.step = mode.first_step();
        self.phone = None;
        self.hotel = None;
        self.user = None;
        self.notice = None;
    }

    /// Prefill the phone number remembered from the last partner login.
    pub async fn restore_phone(&mut self) -> Result<Option<String>> {
        let phone = self.phones.remembered_phone().await?;
        if self.mode == LoginMode::HotelPartner {
            self.phone.clone_from(&phone);
        }
        Ok(phone)
    }

    /// Look up the hotel behind `phone` and pick the next step.
    pub async fn check_hotel(&mut self, phone: &str) -> Result<LoginStep> {
        self.expect(
            LoginMode::HotelPartner,
            &[LoginStep::Initial, LoginStep::SetPassword, LoginStep::Login],
        )?;
        let phone = self.guard(normalize_phone(phone))?;

        let envelope = self.api.check_hotel(&phone).await;
        let profile =
            self.guard(envelope.and_then(|e| require_data(e, "Error checking hotel status")))?;

        self.step = if profile.is_first_login {
            self.notice = Some(Notice::info(SET_PASSWORD_PROMPT));
            LoginStep::SetPassword
        } else {
            self.notice = Some(Notice::info(LOGIN_PROMPT));
            LoginStep::Login
        };
        debug!(first_login = profile.is_first_login, "hotel found");
        self.phone = Some(phone);
        self.hotel = Some(profile);
        Ok(self.step)
    }

    /// Choose the first password for a newly onboarded hotel.
    pub async fn set_password(&mut self, password: &str) -> Result<LoginStep> {
        self.expect(LoginMode::HotelPartner, &[LoginStep::SetPassword])?;
        self.guard(validate_password(password))?;
        let phone = self.require_phone()?;

        let ack = self.api.set_password(&phone, password).await;
        self.guard(ack.and_then(|a| require_success(a, "Error setting password")))?;

        self.notice = Some(Notice::success(PASSWORD_SET_MESSAGE));
        self.step = LoginStep::Login;
        Ok(self.step)
    }

    /// Hotel-partner login with the phone confirmed by `check_hotel`.
    pub async fn login(&mut self, password: &str) -> Result<&AuthenticatedUser> {
        self.expect(LoginMode::HotelPartner, &[LoginStep::Login])?;
        self.guard(validate_password(password))?;
        let phone = self.require_phone()?;

        let envelope = self.api.login(&phone, password).await;
        let user = self.guard(envelope.and_then(|e| require_data(e, "Invalid credentials!")))?;

        if let Err(err) = self.phones.remember_phone(&phone).await {
            warn!(error = %err, "failed to remember phone number");
        }
        Ok(self.authenticated(user))
    }

    /// Admin login. The backend decides; a non-admin role is refused and its
    /// freshly issued session discarded.
    pub async fn login_admin(&mut self, phone: &str, password: &str) -> Result<&AuthenticatedUser> {
        self.expect(LoginMode::Admin, &[LoginStep::Login])?;
        let phone = self.guard(normalize_phone(phone))?;
        self.guard(validate_password(password))?;

        let envelope = self.api.login(&phone, password).await;
        let user =
            self.guard(envelope.and_then(|e| require_data(e, "Invalid admin credentials!")))?;

        if user.role != Role::Admin {
            warn!(role = %user.role, "non-admin account attempted admin login");
            if let Err(err) = self.api.logout().await {
                warn!(error = %err, "failed to discard non-admin session");
            }
            return Err(self.fail(PartnerDeskError::Rejected(NOT_ADMIN_MESSAGE.to_string())));
        }

        self.phone = Some(phone);
        Ok(self.authenticated(user))
    }

    fn authenticated(&mut self, user: AuthenticatedUser) -> &AuthenticatedUser {
        self.notice = Some(Notice::success(format!("Welcome, {}", user.name)));
        self.step = LoginStep::Authenticated;
        self.user.insert(user)
    }

    fn require_phone(&mut self) -> Result<String> {
        let phone = self.phone.clone();
        phone.ok_or_else(|| {
            self.fail(PartnerDeskError::validation("phone", "Check the hotel phone number first"))
        })
    }

    fn expect(&mut self, mode: LoginMode, steps: &[LoginStep]) -> Result<()> {
        if self.mode == mode && steps.contains(&self.step) {
            Ok(())
        } else {
            Err(PartnerDeskError::Internal(format!(
                "{:?} login cannot run this action at step {:?}",
                self.mode, self.step
            )))
        }
    }

    fn guard<T>(&mut self, result: Result<T>) -> Result<T> {
        result.map_err(|err| self.fail(err))
    }

    fn fail(&mut self, err: PartnerDeskError) -> PartnerDeskError {
        self.notice = Some(Notice::error(err.to_string()));
        err
    }
}
