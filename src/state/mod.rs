// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod app_state;
pub mod auth_state;
pub mod scan_state;
pub mod send_pass_state;

pub use app_state::*;
pub use auth_state::*;
pub use scan_state::*;
pub use send_pass_state::*;
