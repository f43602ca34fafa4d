// ============================================================================
// ROUTER - Rutas de la app + sincronización con history del navegador
// ============================================================================

use wasm_bindgen::JsValue;

use crate::utils::constants::{PATH_LOGIN, PATH_SCANNER};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Pantalla de acceso con admin key
    Login,
    /// Scanner QR (protegida)
    Scanner,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => PATH_LOGIN,
            Route::Scanner => PATH_SCANNER,
        }
    }

    /// Rutas desconocidas caen en login
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            p if p == PATH_SCANNER => Route::Scanner,
            _ => Route::Login,
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Scanner)
    }
}

/// `location.pathname` actual
pub fn current_path() -> Option<String> {
    web_sys::window()?.location().pathname().ok()
}

/// Reflejar la ruta en la barra de direcciones (sin recargar)
pub fn sync_history(route: Route) -> Result<(), JsValue> {
    let Some(window) = web_sys::window() else {
        return Ok(());
    };
    if current_path().as_deref() == Some(route.path()) {
        return Ok(());
    }
    window
        .history()?
        .push_state_with_url(&JsValue::NULL, "", Some(route.path()))
}
