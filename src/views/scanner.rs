// ============================================================================
// SCANNER VIEW - Página del scanner QR y modal de cámara (Rust puro)
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, on_click, ElementBuilder};
use crate::state::ScanPhase;
use crate::utils::qr_ffi;
use crate::viewmodels::{ScanViewModel, ViewModels};
use crate::views::{render_header, render_scan_result, render_send_pass_modal};

/// ID del contenedor donde qr_scanner.js monta el vídeo
const QR_READER_ID: &str = "qr-reader";

/// Página principal del admin autenticado
pub fn render_scanner_page(vms: &ViewModels) -> Result<Element, JsValue> {
    let page = ElementBuilder::new("div")?.class("scanner-page").build();
    append_child(&page, &render_header(vms)?)?;

    let main = ElementBuilder::new("main")?.class("scanner-main").build();

    match vms.scan.phase() {
        ScanPhase::Idle => {
            let start_btn = ElementBuilder::new("button")?
                .attr("type", "button")?
                .class("btn-primary btn-scan")
                .text("Scan QR Code")
                .build();
            let vm = vms.scan.clone();
            on_click(&start_btn, move |_| vm.start_scan())?;
            append_child(&main, &start_btn)?;
        }
        ScanPhase::Scanning => {
            append_child(&main, &render_scanner_modal(&vms.scan)?)?;
        }
        _ => {
            append_child(&main, &render_scan_result(&vms.scan)?)?;
        }
    }

    append_child(&page, &main)?;

    if vms.send_pass.is_open() {
        append_child(&page, &render_send_pass_modal(&vms.send_pass)?)?;
    }

    Ok(page)
}

/// Modal de cámara. El primer decode aceptado por el gate para la cámara
/// y lanza la consulta de estado.
fn render_scanner_modal(vm: &ScanViewModel) -> Result<Element, JsValue> {
    let modal = ElementBuilder::new("div")?
        .id("scanner-modal")?
        .class("scanner-modal active")
        .build();

    let content = ElementBuilder::new("div")?.class("scanner-content").build();

    let header = ElementBuilder::new("div")?
        .class("scanner-header")
        .child(ElementBuilder::new("h2")?.text("Scan QR Code").build())?
        .build();

    let reader = ElementBuilder::new("div")?
        .id(QR_READER_ID)?
        .class("qr-reader")
        .build();

    let cancel_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-cancel")
        .text("Cancel")
        .build();
    {
        let vm = vm.clone();
        on_click(&cancel_btn, move |_| vm.cancel_scan())?;
    }

    append_child(&content, &header)?;
    append_child(&content, &reader)?;
    append_child(&content, &cancel_btn)?;
    append_child(&modal, &content)?;

    // Callback del decoder: puede dispararse varias veces con el mismo frame
    let on_decoded = {
        let vm = vm.clone();
        Closure::wrap(Box::new(move |decoded: JsValue| {
            let text = decoded.as_string();
            if vm.on_decode_event(text.as_deref()) {
                let vm = vm.clone();
                spawn_local(async move { vm.check_status().await });
            }
        }) as Box<dyn FnMut(JsValue)>)
    };

    let on_error = {
        let vm = vm.clone();
        Closure::wrap(Box::new(move |error: JsValue| {
            log::error!("❌ [SCANNER] Cámara: {:?}", error);
            vm.on_camera_error();
        }) as Box<dyn FnMut(JsValue)>)
    };

    // Delay para que el contenedor ya esté en el DOM. Si mientras tanto se
    // canceló, se cerró sesión o empezó otro escaneo, no se abre la cámara.
    let session = vm.camera_session();
    let vm = vm.clone();
    Timeout::new(100, move || {
        if !vm.should_start_camera(session) || get_element_by_id(QR_READER_ID).is_none() {
            log::debug!("📷 [SCANNER] Sesión de escaneo terminada, cámara no iniciada");
            return;
        }
        log::info!("📷 [SCANNER] Inicializando cámara...");
        if let Err(e) = qr_ffi::init_qr_scanner(
            QR_READER_ID,
            on_decoded.as_ref().unchecked_ref(),
            on_error.as_ref().unchecked_ref(),
        ) {
            log::error!("❌ [SCANNER] initQrScanner falló: {:?}", e);
            vm.on_camera_error();
            return;
        }
        on_decoded.forget();
        on_error.forget();
    })
    .forget();

    Ok(modal)
}
