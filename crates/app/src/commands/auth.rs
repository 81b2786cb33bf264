//! Sign-in, sign-out and session commands

use partnerdesk_core::{Dashboard, DashboardTab, LoginFlow, LoginMode, LoginStep, PartnerApi};
use partnerdesk_domain::{AuthenticatedUser, PartnerDeskError, Result};
use tracing::info;

use crate::context::AppContext;
use crate::utils::execute_logged;

pub const PHONE_REQUIRED_MESSAGE: &str = "Pass --phone; no phone number is remembered yet";
pub const PASSWORD_NOT_SET_MESSAGE: &str =
    "This hotel has no password yet. Run set-password first.";
pub const PASSWORD_ALREADY_SET_MESSAGE: &str =
    "A password is already set for this hotel. Run login instead.";

/// Report whether the hotel behind `phone` still needs a password.
pub async fn check_hotel(ctx: &AppContext, phone: Option<&str>) -> Result<String> {
    execute_logged("auth::check_hotel", move || async move {
        let mut flow = partner_flow(ctx);
        let phone = resolve_phone(&mut flow, phone).await?;
        let step = flow.check_hotel(&phone).await?;

        let name = flow.hotel().map(|h| h.name.clone()).unwrap_or_default();
        let next = match step {
            LoginStep::SetPassword => "first login, set a password",
            _ => "password set, ready to log in",
        };
        Ok(format!("{name}: {next}"))
    })
    .await
}

/// First-login password selection.
pub async fn set_password(
    ctx: &AppContext,
    phone: Option<&str>,
    password: &str,
) -> Result<String> {
    execute_logged("auth::set_password", move || async move {
        let mut flow = partner_flow(ctx);
        let phone = resolve_phone(&mut flow, phone).await?;

        if flow.check_hotel(&phone).await? != LoginStep::SetPassword {
            return Err(PartnerDeskError::validation("password", PASSWORD_ALREADY_SET_MESSAGE));
        }
        flow.set_password(password).await?;

        Ok(flow.notice().map(ToString::to_string).unwrap_or_default())
    })
    .await
}

/// Sign in as a hotel partner, or as an administrator with `admin`.
pub async fn login(
    ctx: &AppContext,
    phone: Option<&str>,
    password: &str,
    admin: bool,
) -> Result<String> {
    execute_logged("auth::login", move || async move {
        let user = if admin {
            let phone = phone.ok_or_else(|| {
                PartnerDeskError::validation("phone", "Admin login needs --phone")
            })?;
            let mut flow =
                LoginFlow::with_mode(ctx.partner_api(), ctx.phone_memory(), LoginMode::Admin);
            flow.login_admin(phone, password).await?.clone()
        } else {
            let mut flow = partner_flow(ctx);
            let phone = resolve_phone(&mut flow, phone).await?;
            if flow.check_hotel(&phone).await? == LoginStep::SetPassword {
                return Err(PartnerDeskError::validation("password", PASSWORD_NOT_SET_MESSAGE));
            }
            flow.login(password).await?.clone()
        };

        info!(role = %user.role, "signed in");
        Ok(welcome(user))
    })
    .await
}

pub async fn logout(ctx: &AppContext) -> Result<String> {
    execute_logged("auth::logout", move || async move {
        let was_signed_in = ctx.tokens.is_authenticated();
        ctx.api.logout().await?;
        Ok(if was_signed_in { "Signed out".to_string() } else { "Not signed in".to_string() })
    })
    .await
}

/// Describe the stored session without touching the network.
pub async fn whoami(ctx: &AppContext) -> Result<String> {
    let session = ctx.tokens.snapshot();
    let state = if session.is_authenticated() { "Signed in" } else { "Not signed in" };
    Ok(match session.remembered_phone {
        Some(phone) => format!("{state} (phone {phone})"),
        None => state.to_string(),
    })
}

fn partner_flow(ctx: &AppContext) -> LoginFlow {
    LoginFlow::new(ctx.partner_api(), ctx.phone_memory())
}

/// Explicit phone, else the one remembered from the last partner login.
async fn resolve_phone(flow: &mut LoginFlow, phone: Option<&str>) -> Result<String> {
    if let Some(phone) = phone {
        return Ok(phone.to_string());
    }
    flow.restore_phone()
        .await?
        .ok_or_else(|| PartnerDeskError::validation("phone", PHONE_REQUIRED_MESSAGE))
}

fn welcome(user: AuthenticatedUser) -> String {
    let dashboard = Dashboard::new(user);
    let tabs: Vec<&str> = DashboardTab::ALL.iter().map(|tab| tab.label()).collect();
    format!(
        "Welcome, {}\nRole: {}\nHotel id: {}\nDashboard: {}",
        dashboard.user().name,
        dashboard.user().role,
        dashboard.hotel_id(),
        tabs.join(" | ")
    )
}
