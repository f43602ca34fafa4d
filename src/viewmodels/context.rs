// ============================================================================
// APP CONTEXT - Dependencias compartidas por los ViewModels
// ============================================================================

use std::rc::Rc;

use crate::config::{TimerConfig, CONFIG};
use crate::services::{AdminApi, ApiClient};
use crate::state::AppState;
use crate::utils::{
    BrowserSessionStore, Camera, JsQrCamera, MemorySessionStore, Scheduler, SessionStore,
    TimeoutScheduler,
};
use crate::viewmodels::ScanGate;

pub struct AppContext<A: AdminApi = ApiClient> {
    pub state: AppState,
    pub api: Rc<A>,
    pub store: Rc<dyn SessionStore>,
    pub scheduler: Rc<dyn Scheduler>,
    pub camera: Rc<dyn Camera>,
    /// Gate compartido: logout y scan VM cierran el mismo
    pub gate: ScanGate,
    pub timers: TimerConfig,
}

impl<A: AdminApi> AppContext<A> {
    pub fn new(
        api: Rc<A>,
        store: Rc<dyn SessionStore>,
        scheduler: Rc<dyn Scheduler>,
        camera: Rc<dyn Camera>,
        timers: TimerConfig,
    ) -> Self {
        Self {
            state: AppState::new(),
            api,
            store,
            scheduler,
            camera,
            gate: ScanGate::new(),
            timers,
        }
    }
}

impl AppContext<ApiClient> {
    /// Contexto real: fetch + sessionStorage + setTimeout + qr_scanner.js
    pub fn browser() -> Self {
        Self::new(
            Rc::new(ApiClient::new()),
            browser_store(),
            Rc::new(TimeoutScheduler),
            Rc::new(JsQrCamera),
            CONFIG.timers.clone(),
        )
    }
}

impl<A: AdminApi> Clone for AppContext<A> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            api: self.api.clone(),
            store: self.store.clone(),
            scheduler: self.scheduler.clone(),
            camera: self.camera.clone(),
            gate: self.gate.clone(),
            timers: self.timers.clone(),
        }
    }
}

/// sessionStorage si el navegador lo permite (modo privado estricto o
/// iframes sandbox lo bloquean); si no, la sesión vive solo en memoria
fn browser_store() -> Rc<dyn SessionStore> {
    let available = web_sys::window()
        .and_then(|window| window.session_storage().ok().flatten())
        .is_some();
    if available {
        Rc::new(BrowserSessionStore)
    } else {
        log::warn!("⚠️ [STORAGE] sessionStorage no disponible, sesión solo en memoria");
        Rc::new(MemorySessionStore::new())
    }
}
