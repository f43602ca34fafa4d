// ============================================================================
// AUTH STATE - Credencial del admin en memoria (espejo de sessionStorage)
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::AdminCredential;

#[derive(Clone, Default)]
pub struct AuthState {
    pub credential: Rc<RefCell<Option<AdminCredential>>>,
    /// Cambia con cada login, logout o restore: los timers de una sesión
    /// anterior no tocan la actual
    session: Rc<Cell<u64>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_credential(&self, credential: Option<AdminCredential>) {
        *self.credential.borrow_mut() = credential;
        self.session.set(self.session.get().wrapping_add(1));
    }

    pub fn session_generation(&self) -> u64 {
        self.session.get()
    }

    pub fn get_credential(&self) -> Option<AdminCredential> {
        self.credential.borrow().clone()
    }

    #[cfg(test)]
    pub fn is_logged_in(&self) -> bool {
        self.credential.borrow().is_some()
    }

    /// Nombre mostrado en el header
    pub fn admin_name(&self) -> Option<String> {
        self.credential.borrow().as_ref().map(|c| c.name.clone())
    }

    /// Logout - limpiar todo
    pub fn logout(&self) {
        self.set_credential(None);
    }
}
