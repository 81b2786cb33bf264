//! Hotel onboarding

use partnerdesk_core::auth::registration_flow::SUBMITTED_MESSAGE;
use partnerdesk_core::RegistrationFlow;
use partnerdesk_domain::{HotelRegistration, Result};
use partnerdesk_infra::load_attachments;

use super::progress_printer;
use crate::cli::RegisterArgs;
use crate::context::AppContext;
use crate::utils::execute_logged;

pub async fn register(ctx: &AppContext, args: &RegisterArgs) -> Result<String> {
    execute_logged("registration::register", move || async move {
        let registration = HotelRegistration {
            name: args.name.clone(),
            phone: args.phone.clone(),
            address: args.address.clone(),
            business_address: args.business_address.clone(),
            gst: args.gst.clone(),
            aadhar: args.aadhar.clone(),
            hygiene_pics: load_attachments(args.hygiene_pics.as_slice()).await?,
            view360: load_attachments(args.view360.as_slice()).await?,
        };

        let mut flow = RegistrationFlow::new(ctx.partner_api());
        flow.submit(&registration, progress_printer("Submitting registration")).await?;

        Ok(SUBMITTED_MESSAGE.to_string())
    })
    .await
}
