// ============================================================================
// APP - Aplicación principal
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id};
use crate::router::{self, Route};
use crate::viewmodels::{AppContext, ViewModels};
use crate::views::render_app;

/// Aplicación principal
pub struct App {
    ctx: AppContext,
    view_models: ViewModels,
    root: Element,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let ctx = AppContext::browser();
        let view_models = ViewModels::new(&ctx);

        // Cargar credencial del admin desde sessionStorage si existe
        view_models.auth.restore_session();

        // Ruta inicial desde la URL, pasando por el guard
        let requested = router::current_path()
            .map(|path| Route::from_path(&path))
            .unwrap_or(Route::Login);
        ctx.state.set_route(view_models.auth.guard(requested));

        // Suscribirse a cambios de estado para re-renderizar automáticamente
        ctx.state.subscribe_to_changes(move || {
            // Timeout 0 para batchear múltiples updates
            use gloo_timers::callback::Timeout;
            Timeout::new(0, move || {
                crate::rerender_app();
            })
            .forget();
        });

        Ok(Self {
            ctx,
            view_models,
            root,
        })
    }

    /// Renderizar aplicación (re-render completo)
    pub fn render(&mut self) -> Result<(), JsValue> {
        let route = self.ctx.state.route();
        router::sync_history(route)?;

        self.root.set_inner_html("");
        let app_view = render_app(&self.view_models)?;
        append_child(&self.root, &app_view)?;
        Ok(())
    }

    /// Navegación del navegador (atrás/adelante)
    pub fn on_popstate(&self) {
        let requested = router::current_path()
            .map(|path| Route::from_path(&path))
            .unwrap_or(Route::Login);
        log::info!("🧭 [ROUTER] popstate -> {:?}", requested);
        self.view_models.auth.navigate(requested);
    }
}
