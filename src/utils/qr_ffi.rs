// ============================================================================
// QR SCANNER FFI - Foreign Function Interface para JavaScript
// ============================================================================
// Wrappers de qr_scanner.js (cámara + decoder) - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Arranca la cámara trasera y decodifica en `container_id`.
    /// `on_decoded(text)` puede llamarse varias veces para el mismo frame.
    #[wasm_bindgen(catch, js_name = initQrScanner)]
    pub fn init_qr_scanner(
        container_id: &str,
        on_decoded: &js_sys::Function,
        on_error: &js_sys::Function,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = stopQrScanner)]
    pub fn stop_qr_scanner();
}

/// Control de la cámara desde los ViewModels
pub trait Camera {
    /// Liberar la cámara. Sin escáner activo es un no-op.
    fn stop(&self);
}

/// Cámara real vía qr_scanner.js
pub struct JsQrCamera;

impl Camera for JsQrCamera {
    fn stop(&self) {
        log::debug!("📷 [SCANNER] Parando cámara");
        stop_qr_scanner();
    }
}
