pub mod api;
pub mod auth;
pub mod message;
pub mod pass;
pub mod qr;

pub use api::ApiReply;
pub use auth::{AdminCredential, LoginData, LoginRequest};
pub use message::FlashMessage;
pub use pass::{SendPassData, SendPassRequest};
pub use qr::{display_fields, extract_identity, QrRequest, QrStatus, QrStatusData, ScanPayload, ScanResult};
