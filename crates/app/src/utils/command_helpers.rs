//! Command execution helpers
//!
//! Provides utilities to reduce boilerplate when implementing commands with
//! timing and logging.

use std::future::Future;
use std::time::Instant;

use partnerdesk_domain::Result as DomainResult;
use tracing::debug;

use crate::utils::logging::{error_label, log_command_execution};

/// Execute a command with automatic timing and logging
///
/// # Example
///
/// ```rust,ignore
/// pub async fn settings(ctx: &AppContext, hotel_id: &str) -> DomainResult<String> {
///     execute_logged("operations::settings", move || async move {
///         let board = OperationsBoard::new(ctx.partner_api(), hotel_id);
///         board.load().await?;
///         Ok(render(&board))
///     })
///     .await
/// }
/// ```
pub async fn execute_logged<F, Fut, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn().await;

    let elapsed = start.elapsed();
    if let Err(err) = &result {
        debug!(command = command_name, error_type = error_label(err), "command failed");
    }
    log_command_execution(command_name, elapsed, result.is_ok());

    result
}

#[cfg(test)]
mod tests {
    use partnerdesk_domain::PartnerDeskError;

    use super::*;

    #[tokio::test]
    async fn passes_results_through() {
        let ok = execute_logged("test::ok", || async { Ok(7) }).await;
        assert_eq!(ok, Ok(7));

        let err: DomainResult<()> =
            execute_logged("test::err", || async { Err(PartnerDeskError::Timeout) }).await;
        assert_eq!(err, Err(PartnerDeskError::Timeout));
    }
}
