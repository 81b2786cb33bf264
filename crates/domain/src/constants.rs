//! Application constants
//!
//! Centralized location for defaults, backend endpoints and storage keys.

// Configuration defaults
pub const DEFAULT_API_BASE_URL: &str = "https://sshhotels.in/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;
pub const DEFAULT_UPLOAD_TIMEOUT_MS: u64 = 120_000;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "PARTNERDESK_API_URL";

// Session storage
pub const SESSION_DIR_NAME: &str = ".partnerdesk";
pub const SESSION_FILE_NAME: &str = "session.json";
pub const KEYCHAIN_SERVICE: &str = "partnerdesk";
pub const KEYCHAIN_ACCOUNT: &str = "session";

// Auth endpoints
pub const CHECK_HOTEL_PATH: &str = "/auth/check-hotel";
pub const SET_PASSWORD_PATH: &str = "/auth/set-password";
pub const LOGIN_PATH: &str = "/auth/login";
pub const REFRESH_PATH: &str = "/auth/refresh";
pub const LOGOUT_PATH: &str = "/auth/logout";

// Hotel endpoints
pub const REGISTER_HOTEL_PATH: &str = "/hotels/register";
pub const HOTEL_OPERATIONS_PATH: &str = "/hotel-operations";

// Validation
pub const MIN_PASSWORD_LENGTH: usize = 8;
