// ============================================================================
// SEND PASS STATE - Modal de envío de pase por email
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::FlashMessage;

#[derive(Clone, Default)]
pub struct SendPassState {
    pub open: Rc<Cell<bool>>,
    pub email: Rc<RefCell<String>>,
    pub submitting: Rc<Cell<bool>>,
    pub message: Rc<RefCell<Option<FlashMessage>>>,
    /// Cada apertura del modal es una "sesión" distinta (protege el auto-cierre)
    modal_generation: Rc<Cell<u64>>,
}

impl SendPassState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn get_email(&self) -> String {
        self.email.borrow().clone()
    }

    pub fn set_email(&self, email: &str) {
        *self.email.borrow_mut() = email.to_string();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    pub fn set_submitting(&self, submitting: bool) {
        self.submitting.set(submitting);
    }

    pub fn get_message(&self) -> Option<FlashMessage> {
        self.message.borrow().clone()
    }

    pub fn set_message(&self, message: Option<FlashMessage>) {
        *self.message.borrow_mut() = message;
    }

    pub fn modal_generation(&self) -> u64 {
        self.modal_generation.get()
    }

    /// Abrir (open = true) o cerrar el modal con estado limpio
    pub fn reset(&self, open: bool) {
        self.modal_generation.set(self.modal_generation.get().wrapping_add(1));
        self.open.set(open);
        self.submitting.set(false);
        self.email.borrow_mut().clear();
        *self.message.borrow_mut() = None;
    }
}
