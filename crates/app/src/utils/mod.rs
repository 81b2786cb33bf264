pub mod command_helpers;
pub mod logging;

pub use command_helpers::execute_logged;
pub use logging::init_logging;
