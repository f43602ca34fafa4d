// ============================================================================
// APP VIEW - Selecciona la pantalla según la ruta
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::router::Route;
use crate::viewmodels::ViewModels;
use crate::views::{render_login, render_scanner_page};

pub fn render_app(vms: &ViewModels) -> Result<Element, JsValue> {
    match vms.auth.route() {
        Route::Login => render_login(vms),
        Route::Scanner => render_scanner_page(vms),
    }
}
