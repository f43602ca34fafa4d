// ============================================================================
// SCAN RESULT VIEW - Datos del QR, estado del pase y acciones
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::{display_fields, FlashMessage, QrStatus, ScanResult};
use crate::state::ScanPhase;
use crate::viewmodels::ScanViewModel;

pub fn render_scan_result(vm: &ScanViewModel) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("section")?.class("scan-result").build();

    match vm.scan_result() {
        Some(ScanResult::Error(message)) => {
            append_child(&card, &ElementBuilder::new("h2")?.text("Scan Failed").build())?;
            append_child(&card, &render_flash(&FlashMessage::error(message))?)?;
        }
        Some(ScanResult::Valid(payload)) => {
            append_child(&card, &ElementBuilder::new("h2")?.text("Scan Result").build())?;

            let fields = ElementBuilder::new("div")?.class("scan-fields").build();
            for (key, value) in display_fields(&payload) {
                let line = ElementBuilder::new("p")?
                    .class("scan-field")
                    .child(ElementBuilder::new("strong")?.text(&format!("{}: ", key)).build())?
                    .child(ElementBuilder::new("span")?.text(&value).build())?
                    .build();
                append_child(&fields, &line)?;
            }
            append_child(&card, &fields)?;

            if let Some(status) = vm.qr_status() {
                append_child(&card, &render_status(&status)?)?;
            }

            if vm.can_verify() {
                let verify_btn = ElementBuilder::new("button")?
                    .attr("type", "button")?
                    .class("btn-primary btn-verify")
                    .text("Verify")
                    .build();
                let vm = vm.clone();
                on_click(&verify_btn, move |_| {
                    let vm = vm.clone();
                    spawn_local(async move { vm.verify().await });
                })?;
                append_child(&card, &verify_btn)?;
            } else if vm.phase() == ScanPhase::Verifying {
                let verifying = ElementBuilder::new("button")?
                    .attr("type", "button")?
                    .class("btn-primary btn-verify")
                    .flag("disabled", true)?
                    .text("Verifying...")
                    .build();
                append_child(&card, &verifying)?;
            }

            if let Some(message) = vm.verify_message() {
                append_child(&card, &render_flash(&message)?)?;
            }
        }
        None => {}
    }

    let again_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-secondary btn-scan-another")
        .text("Scan Another")
        .build();
    {
        let vm = vm.clone();
        on_click(&again_btn, move |_| vm.scan_another())?;
    }
    append_child(&card, &again_btn)?;

    Ok(card)
}

fn render_status(status: &QrStatus) -> Result<Element, JsValue> {
    if status.loading {
        return Ok(ElementBuilder::new("p")?
            .class("qr-status status-loading")
            .text("Checking pass status...")
            .build());
    }
    let class = match status.is_used {
        Some(true) => "qr-status status-used",
        Some(false) => "qr-status status-valid",
        None => "qr-status status-unknown",
    };
    Ok(ElementBuilder::new("p")?
        .class(class)
        .text(status.message.as_deref().unwrap_or_default())
        .build())
}

pub(crate) fn render_flash(message: &FlashMessage) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class(&format!("message {}", message.kind.css_class()))
        .attr("role", if message.is_success() { "status" } else { "alert" })?
        .text(&message.text)
        .build())
}
