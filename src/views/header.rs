// ============================================================================
// HEADER - Título, saludo al admin, "Send Pass" y logout
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::viewmodels::ViewModels;

pub fn render_header(vms: &ViewModels) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("header")?.class("app-header").build();

    let title = ElementBuilder::new("h1")?.text("Parsec Admin").build();

    let welcome = ElementBuilder::new("p")?
        .class("welcome")
        .text(&format!("Welcome back, {}", vms.auth.admin_name()))
        .build();

    let actions = ElementBuilder::new("div")?.class("header-actions").build();

    let send_pass_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-secondary")
        .text("Send Pass")
        .build();
    {
        let vm = vms.send_pass.clone();
        on_click(&send_pass_btn, move |_| {
            log::info!("🖱️ [HEADER] Abriendo modal Send Pass");
            vm.open_modal();
        })?;
    }

    let logout_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-logout")
        .text("Logout")
        .build();
    {
        let vm = vms.auth.clone();
        on_click(&logout_btn, move |_| vm.logout())?;
    }

    append_child(&actions, &send_pass_btn)?;
    append_child(&actions, &logout_btn)?;
    append_child(&header, &title)?;
    append_child(&header, &welcome)?;
    append_child(&header, &actions)?;

    Ok(header)
}
