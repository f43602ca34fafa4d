// Utils compartidos

pub mod constants;
pub mod logging;
pub mod qr_ffi;
pub mod scheduler;
pub mod storage;

pub use qr_ffi::{Camera, JsQrCamera};
pub use scheduler::{Scheduler, TimeoutScheduler};
pub use storage::{BrowserSessionStore, MemorySessionStore, SessionStore};
