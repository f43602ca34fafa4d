// ============================================================================
// SEND PASS MODAL - Enviar el pase de un asistente por email
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, on_input_value, on_submit, ElementBuilder};
use crate::viewmodels::SendPassViewModel;
use crate::views::scan_result::render_flash;

pub fn render_send_pass_modal(vm: &SendPassViewModel) -> Result<Element, JsValue> {
    let submitting = vm.is_submitting();

    let modal = ElementBuilder::new("div")?
        .id("send-pass-modal")?
        .class("modal active")
        .build();
    let content = ElementBuilder::new("div")?.class("modal-content").build();

    let header = ElementBuilder::new("div")?
        .class("modal-header")
        .child(ElementBuilder::new("h2")?.text("Send Pass").build())?
        .build();
    let close_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-close")
        .attr("aria-label", "Close")?
        .text("✕")
        .build();
    {
        let vm = vm.clone();
        on_click(&close_btn, move |_| vm.close_modal())?;
    }
    append_child(&header, &close_btn)?;

    let form = ElementBuilder::new("form")?.class("send-pass-form").build();
    let input = ElementBuilder::new("input")?
        .attr("type", "email")?
        .id("send-pass-email")?
        .attr("placeholder", "attendee@example.com")?
        .attr("value", &vm.email())?
        .class("form-input")
        .flag("disabled", submitting)?
        .build();
    {
        let vm = vm.clone();
        on_input_value(&input, move |value| vm.set_email(&value))?;
    }

    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-primary")
        .flag("disabled", submitting)?
        .text(if submitting { "Sending..." } else { "Send Pass" })
        .build();
    {
        let vm = vm.clone();
        on_submit(&form, move || {
            let vm = vm.clone();
            spawn_local(async move { vm.submit().await });
        })?;
    }

    append_child(&form, &input)?;
    append_child(&form, &submit_btn)?;

    append_child(&content, &header)?;
    append_child(&content, &form)?;
    if let Some(message) = vm.message() {
        append_child(&content, &render_flash(&message)?)?;
    }
    append_child(&modal, &content)?;

    Ok(modal)
}
