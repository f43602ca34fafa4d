pub mod auth_viewmodel;
pub mod context;
pub mod scan_gate;
pub mod scan_viewmodel;
pub mod send_pass_viewmodel;

pub use auth_viewmodel::AuthViewModel;
pub use context::AppContext;
pub use scan_gate::ScanGate;
pub use scan_viewmodel::ScanViewModel;
pub use send_pass_viewmodel::SendPassViewModel;

use crate::services::{AdminApi, ApiClient};

/// ViewModels de la app, creados una sola vez y compartidos por las vistas
pub struct ViewModels<A: AdminApi = ApiClient> {
    pub auth: AuthViewModel<A>,
    pub scan: ScanViewModel<A>,
    pub send_pass: SendPassViewModel<A>,
}

impl<A: AdminApi + 'static> ViewModels<A> {
    pub fn new(ctx: &AppContext<A>) -> Self {
        let auth = AuthViewModel::new(ctx.clone());
        Self {
            scan: ScanViewModel::new(ctx.clone(), auth.clone()),
            send_pass: SendPassViewModel::new(ctx.clone(), auth.clone()),
            auth,
        }
    }
}

impl<A: AdminApi> Clone for ViewModels<A> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
            scan: self.scan.clone(),
            send_pass: self.send_pass.clone(),
        }
    }
}
