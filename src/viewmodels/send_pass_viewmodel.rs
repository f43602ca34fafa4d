// ============================================================================
// SEND PASS VIEWMODEL - Modal "enviar pase por email"
// ============================================================================

use regex::Regex;

use crate::models::{FlashMessage, SendPassData, SendPassRequest};
use crate::services::{AdminApi, ApiClient};
use crate::utils::constants::{
    MSG_EMAIL_INVALID, MSG_EMAIL_REQUIRED, MSG_SEND_PASS_FALLBACK, MSG_SEND_PASS_NETWORK,
    MSG_SESSION_EXPIRED,
};
use crate::viewmodels::{AppContext, AuthViewModel};

/// Validación simple `local@dominio.tld`
pub fn is_valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

pub struct SendPassViewModel<A: AdminApi = ApiClient> {
    ctx: AppContext<A>,
    auth: AuthViewModel<A>,
}

impl<A: AdminApi + 'static> SendPassViewModel<A> {
    pub fn new(ctx: AppContext<A>, auth: AuthViewModel<A>) -> Self {
        Self { ctx, auth }
    }

    pub fn is_open(&self) -> bool {
        self.ctx.state.send_pass.is_open()
    }

    pub fn open_modal(&self) {
        self.ctx.state.send_pass.reset(true);
        self.ctx.state.notify_subscribers();
    }

    pub fn close_modal(&self) {
        self.ctx.state.send_pass.reset(false);
        self.ctx.state.notify_subscribers();
    }

    /// Se llama en cada input; sin re-render para no perder el foco
    pub fn set_email(&self, email: &str) {
        self.ctx.state.send_pass.set_email(email);
    }

    pub fn email(&self) -> String {
        self.ctx.state.send_pass.get_email()
    }

    pub fn is_submitting(&self) -> bool {
        self.ctx.state.send_pass.is_submitting()
    }

    pub fn message(&self) -> Option<FlashMessage> {
        self.ctx.state.send_pass.get_message()
    }

    fn show(&self, message: FlashMessage) {
        self.ctx.state.send_pass.set_message(Some(message));
        self.ctx.state.notify_subscribers();
    }

    pub async fn submit(&self) {
        let send_pass = &self.ctx.state.send_pass;
        if send_pass.is_submitting() {
            return;
        }

        let email = send_pass.get_email().trim().to_string();
        if email.is_empty() {
            self.show(FlashMessage::error(MSG_EMAIL_REQUIRED));
            return;
        }
        if !is_valid_email(&email) {
            self.show(FlashMessage::error(MSG_EMAIL_INVALID));
            return;
        }

        let Some(token) = self.ctx.state.auth.get_credential().map(|c| c.token) else {
            self.show(FlashMessage::error(MSG_SESSION_EXPIRED));
            self.auth.expire_session();
            return;
        };

        let generation = send_pass.modal_generation();
        send_pass.set_message(None);
        send_pass.set_submitting(true);
        self.ctx.state.notify_subscribers();

        log::info!("📧 [SEND_PASS] Enviando pase...");
        let request = SendPassRequest {
            email: email.clone(),
        };
        let result = self.ctx.api.give_pass(&token, &request).await;

        // Modal cerrado o reabierto mientras esperábamos
        if send_pass.modal_generation() != generation {
            log::debug!("🗑️ [SEND_PASS] Respuesta descartada, el modal ya no es el mismo");
            return;
        }

        let message = match result {
            Err(e) => {
                log::error!("❌ [SEND_PASS] Error de red: {}", e);
                FlashMessage::error(MSG_SEND_PASS_NETWORK)
            }
            Ok(reply) if reply.status == 401 => {
                self.auth.expire_session();
                FlashMessage::error(MSG_SESSION_EXPIRED)
            }
            Ok(reply) if reply.status == 400 || reply.status == 404 => {
                FlashMessage::error(reply.envelope().message_or(MSG_SEND_PASS_FALLBACK))
            }
            Ok(reply) if !reply.ok() => {
                log::warn!("⚠️ [SEND_PASS] Respuesta inesperada (HTTP {})", reply.status);
                FlashMessage::error(format!(
                    "An unexpected error occurred ({}). Please try again.",
                    reply.status
                ))
            }
            Ok(reply) => {
                let envelope = reply.envelope();
                if reply.status == 201 || envelope.is_success() {
                    let order = envelope
                        .data_as::<SendPassData>()
                        .and_then(|data| data.order_reference());
                    log::info!("✅ [SEND_PASS] Pase enviado");
                    self.schedule_auto_close(generation);
                    FlashMessage::success(success_text(&email, order.as_deref()))
                } else {
                    FlashMessage::error(envelope.message_or(MSG_SEND_PASS_FALLBACK))
                }
            }
        };

        send_pass.set_submitting(false);
        self.show(message);
    }

    fn schedule_auto_close(&self, generation: u64) {
        let vm = self.clone();
        self.ctx.scheduler.after(
            self.ctx.timers.send_pass_auto_close_delay_ms,
            Box::new(move || {
                if vm.ctx.state.send_pass.modal_generation() == generation {
                    vm.close_modal();
                }
            }),
        );
    }
}

fn success_text(email: &str, order: Option<&str>) -> String {
    match order {
        Some(order) => format!("Pass sent successfully to {} (Order #{}).", email, order),
        None => format!("Pass sent successfully to {}.", email),
    }
}

impl<A: AdminApi> Clone for SendPassViewModel<A> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            auth: self.auth.clone(),
        }
    }
}
