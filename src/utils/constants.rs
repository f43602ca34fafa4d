/// Rutas de la API (relativas a `CONFIG.api_base_url`)
pub const ENDPOINT_ADMIN_LOGIN: &str = "/paneermoms/login";
pub const ENDPOINT_QR_GET: &str = "/paneermoms/qr/get";
pub const ENDPOINT_QR_VERIFY: &str = "/paneermoms/qr/verify";
pub const ENDPOINT_GIVE_PASS: &str = "/paneermoms/give-pass";

/// Claves de sessionStorage (scope de pestaña)
pub const STORAGE_KEY_ADMIN_TOKEN: &str = "admin_token";
pub const STORAGE_KEY_ADMIN_NAME: &str = "admin_name";

pub const DEFAULT_ADMIN_NAME: &str = "Admin";

// Rutas de la app
pub const PATH_LOGIN: &str = "/";
pub const PATH_SCANNER: &str = "/admin/qr";

// ----------------------------------------------------------------------------
// Mensajes al operador
// ----------------------------------------------------------------------------

pub const MSG_INVALID_QR_FORMAT: &str = "Invalid QR code format.";
pub const MSG_CAMERA_ERROR: &str = "Camera error or permission denied.";
pub const MSG_INVALID_QR_DATA: &str = "Invalid QR data: order ID or attendee name is missing.";
pub const MSG_SESSION_EXPIRED: &str = "Session expired. Please log in again.";
pub const MSG_QR_NOT_FOUND: &str = "Invalid QR code. This pass does not exist.";
pub const MSG_PASS_ALREADY_USED: &str = "This pass has already been used.";
pub const MSG_PASS_VALID: &str = "Valid pass. Not used yet.";
pub const MSG_STATUS_FALLBACK: &str = "Unable to check the QR code status.";
pub const MSG_STATUS_NETWORK: &str = "Error checking QR status. Please try again.";
pub const MSG_VERIFY_SUCCESS: &str = "Pass verified successfully. Entry granted.";
pub const MSG_VERIFY_FALLBACK: &str = "Verification failed. Please try again.";
pub const MSG_VERIFY_NETWORK: &str = "Error verifying pass. Please try again.";

pub const MSG_EMAIL_REQUIRED: &str = "Please enter an email address.";
pub const MSG_EMAIL_INVALID: &str = "Please enter a valid email address.";
pub const MSG_SEND_PASS_FALLBACK: &str = "Unable to send the pass.";
pub const MSG_SEND_PASS_NETWORK: &str = "Network error: Unable to send the pass. Please try again.";

pub const MSG_ADMIN_KEY_REQUIRED: &str = "Please enter admin key";
pub const MSG_INVALID_ADMIN_KEY: &str = "Invalid admin key";
pub const MSG_LOGIN_NETWORK: &str = "Network error: Unable to connect to server. Please try again.";
