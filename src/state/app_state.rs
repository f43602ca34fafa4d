// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::router::Route;
use crate::state::{AuthState, ScanState, SendPassState};

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub scan: ScanState,
    pub send_pass: SendPassState,

    pub route: Rc<RefCell<Route>>,

    // Reactivity: callbacks para notificar cambios (re-render)
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            auth: AuthState::new(),
            scan: ScanState::new(),
            send_pass: SendPassState::new(),
            route: Rc::new(RefCell::new(Route::Login)),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn route(&self) -> Route {
        *self.route.borrow()
    }

    pub fn set_route(&self, route: Route) {
        *self.route.borrow_mut() = route;
    }

    /// Suscribirse a cambios de estado
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers
    pub fn notify_subscribers(&self) {
        // Clonar la lista: un subscriber puede suscribir otro durante la notificación
        let subscribers: Vec<Rc<dyn Fn()>> = self.change_subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
