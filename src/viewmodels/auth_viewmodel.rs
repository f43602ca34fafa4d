// ============================================================================
// AUTH VIEWMODEL - Login, logout, guard de rutas y expiración de sesión
// ============================================================================

use crate::models::{AdminCredential, LoginData, LoginRequest};
use crate::router::Route;
use crate::state::ScanPhase;
use crate::services::{AdminApi, ApiClient};
use crate::utils::constants::{DEFAULT_ADMIN_NAME, MSG_ADMIN_KEY_REQUIRED, MSG_INVALID_ADMIN_KEY, MSG_LOGIN_NETWORK};
use crate::viewmodels::AppContext;

pub struct AuthViewModel<A: AdminApi = ApiClient> {
    ctx: AppContext<A>,
}

impl<A: AdminApi + 'static> AuthViewModel<A> {
    pub fn new(ctx: AppContext<A>) -> Self {
        Self { ctx }
    }

    /// Cargar credencial de sessionStorage al arrancar
    pub fn restore_session(&self) -> bool {
        let credential = self.ctx.store.load_credential();
        let restored = credential.is_some();
        if restored {
            log::info!("💾 [AUTH] Sesión de admin restaurada desde sessionStorage");
        }
        self.ctx.state.auth.set_credential(credential);
        restored
    }

    pub fn route(&self) -> Route {
        self.ctx.state.route()
    }

    pub fn admin_name(&self) -> String {
        self.ctx
            .state
            .auth
            .admin_name()
            .unwrap_or_else(|| DEFAULT_ADMIN_NAME.to_string())
    }

    /// Route guard: sin `admin_token` las rutas protegidas van a login;
    /// con sesión, login redirige al scanner
    pub fn guard(&self, requested: Route) -> Route {
        let has_token = self.ctx.store.has_token();
        match requested {
            route if route.requires_auth() && !has_token => {
                log::warn!("🔒 [AUTH] Sin token, redirigiendo a login");
                Route::Login
            }
            Route::Login if has_token => Route::Scanner,
            route => route,
        }
    }

    /// Navegar pasando por el guard
    pub fn navigate(&self, requested: Route) {
        let route = self.guard(requested);
        self.ctx.state.set_route(route);
        self.ctx.state.notify_subscribers();
    }

    /// Login con admin key. Devuelve el mensaje a mostrar si falla.
    pub async fn login(&self, admin_key: &str) -> Result<AdminCredential, String> {
        if admin_key.trim().is_empty() {
            return Err(MSG_ADMIN_KEY_REQUIRED.to_string());
        }

        log::info!("🔐 [AUTH] Iniciando login de admin...");
        let request = LoginRequest {
            admin_key: admin_key.to_string(),
        };
        let reply = self.ctx.api.login(&request).await.map_err(|e| {
            log::error!("❌ [AUTH] Error de red en login: {}", e);
            MSG_LOGIN_NETWORK.to_string()
        })?;

        // Body no-JSON = el servidor no respondió como se esperaba
        if reply.body.is_none() {
            log::error!("❌ [AUTH] Respuesta de login sin JSON (HTTP {})", reply.status);
            return Err(MSG_LOGIN_NETWORK.to_string());
        }

        let envelope = reply.envelope();
        let data = envelope.data_as::<LoginData>().unwrap_or_default();
        let token = data.token.filter(|token| !token.is_empty());

        match token {
            Some(token) if reply.ok() && envelope.is_success() => {
                let credential = AdminCredential {
                    token,
                    name: data
                        .name
                        .filter(|name| !name.is_empty())
                        .unwrap_or_else(|| DEFAULT_ADMIN_NAME.to_string()),
                };
                self.ctx.store.save_credential(&credential).map_err(|e| {
                    log::error!("❌ [AUTH] No se pudo guardar la credencial: {}", e);
                    e.to_string()
                })?;
                self.ctx.state.auth.set_credential(Some(credential.clone()));
                log::info!("✅ [AUTH] Login exitoso como {}", credential.name);
                self.navigate(Route::Scanner);
                Ok(credential)
            }
            _ => {
                log::warn!("⚠️ [AUTH] Login rechazado (HTTP {})", reply.status);
                Err(envelope.message_or(MSG_INVALID_ADMIN_KEY))
            }
        }
    }

    /// Logout completo: sessionStorage, estado en memoria y vuelta a login
    pub fn logout(&self) {
        log::info!("👋 [AUTH] Logout - limpiando sesión");
        if self.ctx.state.scan.phase() == ScanPhase::Scanning {
            self.ctx.camera.stop();
        }
        self.ctx.gate.close_gate();
        self.ctx.store.clear();
        self.ctx.state.auth.logout();
        self.ctx.state.scan.reset();
        self.ctx.state.send_pass.reset(false);
        self.ctx.state.set_route(Route::Login);
        self.ctx.state.notify_subscribers();
    }

    /// 401: dejar leer el mensaje y luego forzar logout. El timer solo
    /// actúa sobre la sesión que lo programó.
    pub fn expire_session(&self) {
        let delay = self.ctx.timers.session_expired_logout_delay_ms;
        let session = self.ctx.state.auth.session_generation();
        log::warn!("⏰ [AUTH] Sesión expirada, logout en {} ms", delay);
        let vm = self.clone();
        self.ctx.scheduler.after(
            delay,
            Box::new(move || {
                if vm.ctx.state.auth.session_generation() != session {
                    log::debug!("🗑️ [AUTH] Logout diferido de una sesión anterior, ignorado");
                    return;
                }
                vm.logout();
            }),
        );
    }

    /// Re-validar la credencial guardada (p.ej. tras "scan another")
    pub fn revalidate_session(&self) -> bool {
        if self.ctx.store.has_token() {
            return true;
        }
        log::warn!("🔒 [AUTH] Credencial ausente al re-validar, forzando logout");
        self.logout();
        false
    }
}

impl<A: AdminApi> Clone for AuthViewModel<A> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testing::{Harness, MockCall};
    use crate::utils::{MemorySessionStore, SessionStore};
    use serde_json::json;

    #[test]
    fn test_guard_redirects_without_token() {
        let harness = Harness::new(MemorySessionStore::new());
        let vm = AuthViewModel::new(harness.ctx.clone());
        assert_eq!(vm.guard(Route::Scanner), Route::Login);
        assert_eq!(vm.guard(Route::Login), Route::Login);
    }

    #[test]
    fn test_guard_sends_authenticated_admin_to_scanner() {
        let harness = Harness::logged_in();
        let vm = AuthViewModel::new(harness.ctx.clone());
        assert_eq!(vm.guard(Route::Scanner), Route::Scanner);
        assert_eq!(vm.guard(Route::Login), Route::Scanner);
    }

    #[tokio::test]
    async fn test_empty_key_is_rejected_locally() {
        let harness = Harness::new(MemorySessionStore::new());
        let vm = AuthViewModel::new(harness.ctx.clone());
        assert_eq!(vm.login("   ").await, Err(MSG_ADMIN_KEY_REQUIRED.to_string()));
        assert_eq!(harness.api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_login_stores_credential_and_navigates() {
        let harness = Harness::new(MemorySessionStore::new());
        harness.api.push_reply(
            200,
            Some(json!({"status": "success", "data": {"token": "jwt", "name": "Riya"}})),
        );
        let vm = AuthViewModel::new(harness.ctx.clone());

        let credential = vm.login("secret").await.unwrap();

        assert_eq!(credential.token, "jwt");
        assert_eq!(harness.store.load_credential(), Some(credential));
        assert_eq!(harness.ctx.state.route(), Route::Scanner);
        assert_eq!(
            harness.api.calls(),
            vec![MockCall::Login { admin_key: "secret".to_string() }]
        );
    }

    #[tokio::test]
    async fn test_login_without_name_defaults_to_admin() {
        let harness = Harness::new(MemorySessionStore::new());
        harness.api.push_reply(200, Some(json!({"status": "success", "data": {"token": "jwt"}})));
        let vm = AuthViewModel::new(harness.ctx.clone());
        assert_eq!(vm.login("secret").await.map(|c| c.name), Ok(DEFAULT_ADMIN_NAME.to_string()));
    }

    #[tokio::test]
    async fn test_rejected_login_surfaces_server_message() {
        let harness = Harness::new(MemorySessionStore::new());
        harness.api.push_reply(401, Some(json!({"status": "fail", "message": "Wrong key"})));
        harness.api.push_reply(200, Some(json!({"status": "success", "data": {}})));
        let vm = AuthViewModel::new(harness.ctx.clone());

        assert_eq!(vm.login("bad").await, Err("Wrong key".to_string()));
        assert_eq!(vm.login("bad").await, Err(MSG_INVALID_ADMIN_KEY.to_string()));
        assert!(!harness.store.has_token());
        assert_eq!(harness.ctx.state.route(), Route::Login);
    }

    #[tokio::test]
    async fn test_network_failure_on_login() {
        let harness = Harness::new(MemorySessionStore::new());
        harness.api.push_error(ApiError::Network("offline".to_string()));
        let vm = AuthViewModel::new(harness.ctx.clone());
        assert_eq!(vm.login("secret").await, Err(MSG_LOGIN_NETWORK.to_string()));
    }

    #[test]
    fn test_expire_session_logs_out_after_delay() {
        let harness = Harness::logged_in();
        let vm = AuthViewModel::new(harness.ctx.clone());

        vm.expire_session();
        assert!(harness.store.has_token());
        assert_eq!(harness.scheduler.pending_delays(), vec![1800]);

        harness.scheduler.run_all();
        assert!(harness.store.is_empty());
        assert!(!harness.ctx.state.auth.is_logged_in());
        assert_eq!(harness.ctx.state.route(), Route::Login);
    }

    #[tokio::test]
    async fn test_expiry_timer_does_not_end_a_newer_session() {
        let harness = Harness::logged_in();
        let vm = AuthViewModel::new(harness.ctx.clone());
        vm.expire_session();
        vm.logout();

        harness.api.push_reply(
            200,
            Some(json!({"status": "success", "data": {"token": "fresh", "name": "Riya"}})),
        );
        vm.login("secret").await.unwrap();
        harness.scheduler.run_all();

        assert!(harness.ctx.state.auth.is_logged_in());
        assert_eq!(harness.store.load_credential().map(|c| c.token), Some("fresh".to_string()));
        assert_eq!(harness.ctx.state.route(), Route::Scanner);
    }

    #[test]
    fn test_logout_while_scanning_stops_camera_and_closes_gate() {
        let harness = Harness::logged_in();
        let vm = AuthViewModel::new(harness.ctx.clone());
        harness.ctx.state.scan.set_phase(ScanPhase::Scanning);
        let ticket = harness.ctx.gate.begin_arming();
        assert!(harness.ctx.gate.arm(ticket));

        vm.logout();

        assert_eq!(harness.camera.stop_count(), 1);
        assert!(!harness.ctx.gate.is_open());
        assert_eq!(harness.ctx.state.scan.phase(), ScanPhase::Idle);
    }

    #[test]
    fn test_revalidate_forces_logout_when_token_vanished() {
        let harness = Harness::logged_in();
        let vm = AuthViewModel::new(harness.ctx.clone());
        assert!(vm.revalidate_session());

        harness.store.clear();
        assert!(!vm.revalidate_session());
        assert_eq!(harness.ctx.state.route(), Route::Login);
    }
}
