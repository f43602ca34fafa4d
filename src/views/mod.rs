pub mod app;
pub mod header;
pub mod login;
pub mod scan_result;
pub mod scanner;
pub mod send_pass_modal;

pub use app::render_app;
pub use header::render_header;
pub use login::render_login;
pub use scan_result::render_scan_result;
pub use scanner::render_scanner_page;
pub use send_pass_modal::render_send_pass_modal;
