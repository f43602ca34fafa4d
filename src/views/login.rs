// ============================================================================
// LOGIN VIEW - Formulario de admin key
// ============================================================================
// Estado local del formulario en closures (key, visibilidad, loading);
// los errores se pintan directo en el DOM sin re-render completo.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{
    append_child, on_click, on_input_value, on_submit, set_attribute, set_hidden,
    set_text_content, toggle_attribute, ElementBuilder,
};
use crate::viewmodels::ViewModels;

const BTN_LOGIN: &str = "Login";
const BTN_AUTHENTICATING: &str = "Authenticating...";

/// Renderizar vista de login
pub fn render_login(vms: &ViewModels) -> Result<Element, JsValue> {
    log::debug!("🎬 [LOGIN] render_login()");

    let admin_key = Rc::new(RefCell::new(String::new()));
    let loading = Rc::new(Cell::new(false));

    let login_screen = ElementBuilder::new("div")?.class("login-screen").build();
    let login_container = ElementBuilder::new("div")?.class("login-container").build();

    let login_header = ElementBuilder::new("div")?
        .class("login-header")
        .child(ElementBuilder::new("h1")?.text("Parsec Admin").build())?
        .child(
            ElementBuilder::new("p")?
                .text("Enter your admin key to continue")
                .build(),
        )?
        .build();

    let form = ElementBuilder::new("form")?.class("login-form").build();

    // Input admin key + toggle mostrar/ocultar
    let group = ElementBuilder::new("div")?.class("form-group").build();
    let label = ElementBuilder::new("label")?
        .attr("for", "admin-key")?
        .text("Admin Key")
        .build();
    let input_row = ElementBuilder::new("div")?.class("input-row").build();
    let input = ElementBuilder::new("input")?
        .attr("type", "password")?
        .id("admin-key")?
        .attr("name", "admin-key")?
        .attr("placeholder", "Enter admin key")?
        .attr("autocomplete", "off")?
        .class("form-input")
        .build();
    {
        let admin_key = admin_key.clone();
        on_input_value(&input, move |value| *admin_key.borrow_mut() = value)?;
    }

    let toggle_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-toggle-key")
        .text("Show")
        .build();
    {
        let input = input.clone();
        let toggle = toggle_btn.clone();
        let visible = Rc::new(Cell::new(false));
        on_click(&toggle_btn, move |_| {
            let show = !visible.get();
            visible.set(show);
            let _ = set_attribute(&input, "type", if show { "text" } else { "password" });
            set_text_content(&toggle, if show { "Hide" } else { "Show" });
        })?;
    }

    append_child(&input_row, &input)?;
    append_child(&input_row, &toggle_btn)?;
    append_child(&group, &label)?;
    append_child(&group, &input_row)?;

    let error_box = ElementBuilder::new("div")?
        .class("message message-error hidden")
        .attr("role", "alert")?
        .build();

    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-login")
        .text(BTN_LOGIN)
        .build();

    {
        let vm = vms.auth.clone();
        let admin_key = admin_key.clone();
        let input = input.clone();
        let error_box = error_box.clone();
        let submit_btn = submit_btn.clone();

        on_submit(&form, move || {
            if loading.get() {
                return;
            }
            let key = admin_key.borrow().clone();

            loading.set(true);
            let _ = set_hidden(&error_box, true);
            let _ = toggle_attribute(&submit_btn, "disabled", true);
            set_text_content(&submit_btn, BTN_AUTHENTICATING);

            let vm = vm.clone();
            let admin_key = admin_key.clone();
            let loading = loading.clone();
            let input = input.clone();
            let error_box = error_box.clone();
            let submit_btn = submit_btn.clone();

            spawn_local(async move {
                // En éxito el ViewModel navega al scanner y la vista se re-renderiza
                if let Err(message) = vm.login(&key).await {
                    set_text_content(&error_box, &message);
                    let _ = set_hidden(&error_box, false);
                    admin_key.borrow_mut().clear();
                    if let Some(input) = input.dyn_ref::<HtmlInputElement>() {
                        input.set_value("");
                    }
                }
                loading.set(false);
                let _ = toggle_attribute(&submit_btn, "disabled", false);
                set_text_content(&submit_btn, BTN_LOGIN);
            });
        })?;
    }

    append_child(&form, &group)?;
    append_child(&form, &error_box)?;
    append_child(&form, &submit_btn)?;

    append_child(&login_container, &login_header)?;
    append_child(&login_container, &form)?;
    append_child(&login_screen, &login_container)?;

    Ok(login_screen)
}
