// ============================================================================
// SCAN VIEWMODEL - Escaneo QR, consulta de estado y verificación del pase
// ============================================================================
// Flujo: Idle -> Scanning -> Decoded -> CheckingStatus -> StatusKnown
//        -> Verifying -> Verified
// Cada respuesta HTTP se descarta si el admin ya empezó otro escaneo
// (contador de generación en ScanState).
// ============================================================================

use crate::models::{
    extract_identity, FlashMessage, QrRequest, QrStatus, QrStatusData, ScanResult,
};
use crate::services::{AdminApi, ApiClient};
use crate::state::ScanPhase;
use crate::utils::constants::{
    MSG_CAMERA_ERROR, MSG_INVALID_QR_DATA, MSG_PASS_ALREADY_USED, MSG_PASS_VALID,
    MSG_QR_NOT_FOUND, MSG_SESSION_EXPIRED, MSG_STATUS_FALLBACK, MSG_STATUS_NETWORK,
    MSG_VERIFY_FALLBACK, MSG_VERIFY_NETWORK, MSG_VERIFY_SUCCESS,
};
use crate::viewmodels::{AppContext, AuthViewModel};

pub struct ScanViewModel<A: AdminApi = ApiClient> {
    ctx: AppContext<A>,
    auth: AuthViewModel<A>,
}

impl<A: AdminApi + 'static> ScanViewModel<A> {
    pub fn new(ctx: AppContext<A>, auth: AuthViewModel<A>) -> Self {
        Self { ctx, auth }
    }

    pub fn phase(&self) -> ScanPhase {
        self.ctx.state.scan.phase()
    }

    /// Abrir el modal de cámara. El gate se arma tras el retardo de estabilización.
    pub fn start_scan(&self) {
        log::info!("📷 [SCAN] Iniciando escaneo");
        self.ctx.state.scan.reset();
        self.ctx.state.scan.set_phase(ScanPhase::Scanning);
        self.ctx
            .gate
            .open_gate(self.ctx.scheduler.as_ref(), self.ctx.timers.scan_arm_delay_ms);
        self.ctx.state.notify_subscribers();
    }

    /// Sesión de cámara actual. La vista la captura al montar el modal.
    pub fn camera_session(&self) -> u64 {
        self.ctx.state.scan.generation()
    }

    /// La cámara solo se inicializa si la sesión que montó el modal sigue
    /// escaneando (cancel, logout o un nuevo escaneo la invalidan)
    pub fn should_start_camera(&self, session: u64) -> bool {
        self.phase() == ScanPhase::Scanning && self.ctx.state.scan.is_current(session)
    }

    /// Cancelar: cerrar gate y volver a idle sin resultado
    pub fn cancel_scan(&self) {
        log::info!("🛑 [SCAN] Escaneo cancelado");
        self.ctx.gate.close_gate();
        self.ctx.camera.stop();
        self.ctx.state.scan.set_phase(ScanPhase::Idle);
        self.ctx.state.notify_subscribers();
    }

    /// Callback del decoder. `true` si el evento fue aceptado: la cámara
    /// ya está parada y la vista debe lanzar `check_status`.
    pub fn on_decode_event(&self, decoded: Option<&str>) -> bool {
        let Some(result) = self.ctx.gate.admit(decoded) else {
            return false;
        };
        self.ctx.camera.stop();
        match &result {
            ScanResult::Valid(_) => log::info!("✅ [SCAN] QR decodificado"),
            ScanResult::Error(message) => log::warn!("⚠️ [SCAN] QR inválido: {}", message),
        }
        self.ctx.state.scan.set_scan_result(result);
        self.ctx.state.scan.set_phase(ScanPhase::Decoded);
        self.ctx.state.notify_subscribers();
        true
    }

    /// Error de cámara o permiso denegado. Se acepta mientras el modal esté
    /// escaneando, aunque el gate aún no se haya armado (el permiso se deniega
    /// antes del retardo). Cierra el gate: ningún decode posterior cuenta.
    pub fn on_camera_error(&self) -> bool {
        if self.phase() != ScanPhase::Scanning {
            return false;
        }
        self.ctx.gate.close_gate();
        self.ctx.camera.stop();
        log::error!("❌ [SCAN] Error de cámara");
        self.ctx
            .state
            .scan
            .set_scan_result(ScanResult::Error(MSG_CAMERA_ERROR.to_string()));
        self.ctx.state.scan.set_phase(ScanPhase::Decoded);
        self.ctx.state.notify_subscribers();
        true
    }

    /// Consultar si el pase escaneado ya fue usado
    pub async fn check_status(&self) {
        let scan = &self.ctx.state.scan;
        let generation = scan.generation();

        let Some(payload) = scan.payload() else {
            return;
        };

        if extract_identity(&payload).is_none() {
            log::warn!("⚠️ [SCAN] QR sin orderId/attendeeName, no se consulta");
            self.finish_status(QrStatus::unknown(MSG_INVALID_QR_DATA));
            return;
        }

        let Some(token) = self.ctx.state.auth.get_credential().map(|c| c.token) else {
            self.finish_status(QrStatus::unknown(MSG_SESSION_EXPIRED));
            self.auth.expire_session();
            return;
        };

        let request = match QrRequest::from_payload(&payload) {
            Ok(request) => request,
            Err(e) => {
                log::error!("❌ [SCAN] No se pudo serializar el QR: {}", e);
                self.finish_status(QrStatus::unknown(MSG_INVALID_QR_DATA));
                return;
            }
        };

        scan.set_qr_status(Some(QrStatus::checking()));
        scan.set_phase(ScanPhase::CheckingStatus);
        self.ctx.state.notify_subscribers();

        let result = self.ctx.api.qr_status(&token, &request).await;

        if !scan.is_current(generation) {
            log::debug!("🗑️ [SCAN] Respuesta de estado obsoleta descartada");
            return;
        }

        let status = match result {
            Err(e) => {
                log::error!("❌ [SCAN] Error consultando estado: {}", e);
                QrStatus::unknown(MSG_STATUS_NETWORK)
            }
            Ok(reply) if reply.status == 401 => {
                self.auth.expire_session();
                QrStatus::unknown(MSG_SESSION_EXPIRED)
            }
            Ok(reply) if reply.status == 404 => QrStatus::unknown(MSG_QR_NOT_FOUND),
            Ok(reply) if !reply.ok() || reply.body.is_none() => {
                log::warn!("⚠️ [SCAN] Estado no disponible (HTTP {})", reply.status);
                QrStatus::unknown(MSG_STATUS_NETWORK)
            }
            Ok(reply) => {
                let envelope = reply.envelope();
                let is_used = envelope
                    .data_as::<QrStatusData>()
                    .and_then(|data| data.is_used)
                    .filter(|_| envelope.is_success());
                match is_used {
                    Some(true) => QrStatus::known(true, MSG_PASS_ALREADY_USED),
                    Some(false) => QrStatus::known(false, MSG_PASS_VALID),
                    None => QrStatus::unknown(&envelope.message_or(MSG_STATUS_FALLBACK)),
                }
            }
        };

        log::info!("📋 [SCAN] Estado del pase: {:?}", status.is_used);
        self.finish_status(status);
    }

    fn finish_status(&self, status: QrStatus) {
        self.ctx.state.scan.set_qr_status(Some(status));
        self.ctx.state.scan.set_phase(ScanPhase::StatusKnown);
        self.ctx.state.notify_subscribers();
    }

    /// El botón Verify solo aparece con un pase confirmado como no usado,
    /// sin mensaje de verificación previo y sin request en curso
    pub fn can_verify(&self) -> bool {
        let scan = &self.ctx.state.scan;
        scan.phase() == ScanPhase::StatusKnown
            && scan.get_qr_status().and_then(|s| s.is_used) == Some(false)
            && scan.get_verify_message().is_none()
    }

    /// Marcar el pase como usado
    pub async fn verify(&self) {
        if !self.can_verify() {
            return;
        }
        let scan = &self.ctx.state.scan;
        let generation = scan.generation();

        let (Some(payload), Some(token)) = (
            scan.payload(),
            self.ctx.state.auth.get_credential().map(|c| c.token),
        ) else {
            self.fail_verify(MSG_SESSION_EXPIRED);
            self.auth.expire_session();
            return;
        };

        let request = match QrRequest::from_payload(&payload) {
            Ok(request) => request,
            Err(e) => {
                log::error!("❌ [VERIFY] No se pudo serializar el QR: {}", e);
                self.fail_verify(MSG_VERIFY_FALLBACK);
                return;
            }
        };

        log::info!("🔏 [VERIFY] Verificando pase...");
        scan.set_phase(ScanPhase::Verifying);
        self.ctx.state.notify_subscribers();

        let result = self.ctx.api.qr_verify(&token, &request).await;

        if !scan.is_current(generation) {
            log::debug!("🗑️ [VERIFY] Respuesta obsoleta descartada");
            return;
        }

        match result {
            Err(e) => {
                log::error!("❌ [VERIFY] Error de red: {}", e);
                self.fail_verify(MSG_VERIFY_NETWORK);
            }
            Ok(reply) if reply.status == 401 => {
                self.fail_verify(MSG_SESSION_EXPIRED);
                self.auth.expire_session();
            }
            Ok(reply) => {
                let envelope = reply.envelope();
                if reply.ok() && envelope.is_success() {
                    log::info!("✅ [VERIFY] Pase marcado como usado");
                    // Sin re-consultar: el estado local pasa a "usado"
                    scan.set_qr_status(Some(QrStatus::known(true, MSG_PASS_ALREADY_USED)));
                    scan.set_verify_message(Some(FlashMessage::success(MSG_VERIFY_SUCCESS)));
                    scan.set_phase(ScanPhase::Verified);
                    self.ctx.state.notify_subscribers();
                } else {
                    log::warn!("⚠️ [VERIFY] Verificación rechazada (HTTP {})", reply.status);
                    self.fail_verify(&envelope.message_or(MSG_VERIFY_FALLBACK));
                }
            }
        }
    }

    fn fail_verify(&self, message: &str) {
        self.ctx
            .state
            .scan
            .set_verify_message(Some(FlashMessage::error(message)));
        self.ctx.state.scan.set_phase(ScanPhase::StatusKnown);
        self.ctx.state.notify_subscribers();
    }

    /// Descartar el resultado y volver a idle
    pub fn scan_another(&self) {
        log::info!("🔄 [SCAN] Scan another");
        self.ctx.gate.close_gate();
        self.ctx.state.scan.reset();
        if self.auth.revalidate_session() {
            self.ctx.state.notify_subscribers();
        }
    }

    pub fn scan_result(&self) -> Option<ScanResult> {
        self.ctx.state.scan.get_scan_result()
    }

    #[cfg(test)]
    pub fn payload(&self) -> Option<crate::models::ScanPayload> {
        self.ctx.state.scan.payload()
    }

    pub fn qr_status(&self) -> Option<QrStatus> {
        self.ctx.state.scan.get_qr_status()
    }

    pub fn verify_message(&self) -> Option<FlashMessage> {
        self.ctx.state.scan.get_verify_message()
    }
}

impl<A: AdminApi> Clone for ScanViewModel<A> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            auth: self.auth.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::router::Route;
    use crate::testing::{Harness, MockCall};
    use crate::utils::constants::MSG_INVALID_QR_FORMAT;
    use crate::utils::SessionStore;
    use serde_json::json;

    const VALID_QR: &str = r#"{"orderId":"A1","attendeeName":"X"}"#;

    fn scan_vm(harness: &Harness) -> ScanViewModel<crate::testing::MockApi> {
        let auth = AuthViewModel::new(harness.ctx.clone());
        ScanViewModel::new(harness.ctx.clone(), auth)
    }

    /// Escaneo iniciado y gate ya armado
    fn armed(harness: &Harness) -> ScanViewModel<crate::testing::MockApi> {
        let vm = scan_vm(harness);
        vm.start_scan();
        harness.scheduler.run_all();
        vm
    }

    async fn decoded_with_status(harness: &Harness, is_used: bool) -> ScanViewModel<crate::testing::MockApi> {
        let vm = armed(harness);
        harness.api.push_reply(
            200,
            Some(json!({"status": "success", "data": {"isUsed": is_used}})),
        );
        assert!(vm.on_decode_event(Some(VALID_QR)));
        vm.check_status().await;
        vm
    }

    #[test]
    fn test_decode_before_gate_arms_is_ignored() {
        let harness = Harness::logged_in();
        let vm = scan_vm(&harness);
        vm.start_scan();

        assert_eq!(harness.scheduler.pending_delays(), vec![1000]);
        assert!(!vm.on_decode_event(Some(VALID_QR)));
        assert!(vm.scan_result().is_none());
        assert_eq!(vm.phase(), ScanPhase::Scanning);
    }

    #[test]
    fn test_two_rapid_decodes_produce_one_result() {
        let harness = Harness::logged_in();
        let vm = armed(&harness);

        assert!(vm.on_decode_event(Some(VALID_QR)));
        assert!(!vm.on_decode_event(Some(r#"{"orderId":"B2","attendeeName":"Y"}"#)));

        let payload = vm.payload().unwrap();
        assert_eq!(payload.get("orderId"), Some(&json!("A1")));
        assert_eq!(vm.phase(), ScanPhase::Decoded);
    }

    #[test]
    fn test_cancel_discards_pending_arm() {
        let harness = Harness::logged_in();
        let vm = scan_vm(&harness);
        vm.start_scan();
        vm.cancel_scan();
        harness.scheduler.run_all();

        assert_eq!(vm.phase(), ScanPhase::Idle);
        assert!(!vm.on_decode_event(Some(VALID_QR)));
    }

    #[tokio::test]
    async fn test_non_json_qr_shows_format_error_without_network() {
        let harness = Harness::logged_in();
        let vm = armed(&harness);

        assert!(vm.on_decode_event(Some("hello world")));
        vm.check_status().await;

        assert_eq!(
            vm.scan_result(),
            Some(ScanResult::Error(MSG_INVALID_QR_FORMAT.to_string()))
        );
        assert_eq!(harness.api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_identity_fields_skip_status_call() {
        let harness = Harness::logged_in();
        let vm = armed(&harness);

        assert!(vm.on_decode_event(Some(r#"{"orderId":"A1"}"#)));
        vm.check_status().await;

        assert_eq!(harness.api.call_count(), 0);
        assert_eq!(vm.qr_status(), Some(QrStatus::unknown(MSG_INVALID_QR_DATA)));
        assert!(!vm.can_verify());
    }

    #[tokio::test]
    async fn test_unused_pass_enables_verify() {
        let harness = Harness::logged_in();
        let vm = decoded_with_status(&harness, false).await;

        assert_eq!(vm.qr_status(), Some(QrStatus::known(false, MSG_PASS_VALID)));
        assert!(vm.can_verify());
        assert_eq!(
            harness.api.calls(),
            vec![MockCall::QrStatus {
                token: "tok-123".to_string(),
                qr_data: VALID_QR.to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_used_pass_disables_verify() {
        let harness = Harness::logged_in();
        let vm = decoded_with_status(&harness, true).await;

        assert_eq!(vm.qr_status().and_then(|s| s.is_used), Some(true));
        assert!(!vm.can_verify());

        vm.verify().await;
        assert_eq!(harness.api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_not_found_and_network_failures() {
        let harness = Harness::logged_in();
        let vm = armed(&harness);
        harness.api.push_reply(404, Some(json!({"status": "fail"})));
        vm.on_decode_event(Some(VALID_QR));
        vm.check_status().await;
        assert_eq!(vm.qr_status(), Some(QrStatus::unknown(MSG_QR_NOT_FOUND)));

        harness.api.push_error(ApiError::Network("offline".to_string()));
        vm.check_status().await;
        assert_eq!(vm.qr_status(), Some(QrStatus::unknown(MSG_STATUS_NETWORK)));
        assert!(!vm.can_verify());
    }

    #[tokio::test]
    async fn test_status_without_is_used_shows_server_message() {
        let harness = Harness::logged_in();
        let vm = armed(&harness);
        harness
            .api
            .push_reply(200, Some(json!({"status": "fail", "message": "Event closed"})));
        vm.on_decode_event(Some(VALID_QR));
        vm.check_status().await;

        assert_eq!(vm.qr_status(), Some(QrStatus::unknown("Event closed")));
        assert!(!vm.can_verify());
    }

    #[tokio::test]
    async fn test_unauthorized_status_expires_session() {
        let harness = Harness::logged_in();
        let vm = armed(&harness);
        harness.api.push_reply(401, Some(json!({"status": "fail"})));
        vm.on_decode_event(Some(VALID_QR));
        vm.check_status().await;

        let message = vm.qr_status().and_then(|s| s.message).unwrap();
        assert!(message.to_lowercase().contains("session expired"));
        assert_eq!(harness.scheduler.pending_delays(), vec![1800]);
        assert!(harness.store.has_token());

        harness.scheduler.run_all();
        assert!(harness.store.is_empty());
        assert_eq!(harness.ctx.state.route(), Route::Login);
    }

    #[tokio::test]
    async fn test_verify_success_marks_pass_used_without_refetch() {
        let harness = Harness::logged_in();
        let vm = decoded_with_status(&harness, false).await;
        harness.api.push_reply(200, Some(json!({"status": "success"})));

        vm.verify().await;

        assert_eq!(vm.phase(), ScanPhase::Verified);
        assert_eq!(vm.qr_status().and_then(|s| s.is_used), Some(true));
        assert_eq!(vm.verify_message(), Some(FlashMessage::success(MSG_VERIFY_SUCCESS)));
        assert!(!vm.can_verify());
        assert_eq!(harness.api.call_count(), 2);
        assert!(matches!(harness.api.calls()[1], MockCall::QrVerify { .. }));
    }

    #[tokio::test]
    async fn test_verify_rejection_keeps_pass_unused() {
        let harness = Harness::logged_in();
        let vm = decoded_with_status(&harness, false).await;
        harness
            .api
            .push_reply(409, Some(json!({"status": "fail", "message": "Already checked in"})));

        vm.verify().await;

        assert_eq!(vm.phase(), ScanPhase::StatusKnown);
        assert_eq!(vm.qr_status().and_then(|s| s.is_used), Some(false));
        assert_eq!(vm.verify_message(), Some(FlashMessage::error("Already checked in")));
        assert!(!vm.can_verify());
    }

    #[tokio::test]
    async fn test_stale_status_response_is_dropped_after_scan_another() {
        let harness = Harness::logged_in();
        let vm = armed(&harness);
        vm.on_decode_event(Some(VALID_QR));
        harness.api.push_reply(200, Some(json!({"status": "success", "data": {"isUsed": false}})));
        let release = harness.api.hold_next();

        let interrupt = async {
            while harness.api.call_count() == 0 {
                tokio::task::yield_now().await;
            }
            vm.scan_another();
            let _ = release.send(());
        };
        tokio::join!(vm.check_status(), interrupt);

        assert_eq!(vm.phase(), ScanPhase::Idle);
        assert!(vm.scan_result().is_none());
        assert!(vm.qr_status().is_none());
    }

    #[test]
    fn test_scan_another_logs_out_when_token_vanished() {
        let harness = Harness::logged_in();
        let vm = armed(&harness);
        vm.on_decode_event(Some(VALID_QR));
        harness.store.clear();

        vm.scan_another();

        assert_eq!(harness.ctx.state.route(), Route::Login);
        assert!(!harness.ctx.state.auth.is_logged_in());
    }

    #[test]
    fn test_camera_error_yields_single_result() {
        let harness = Harness::logged_in();
        let vm = armed(&harness);

        assert!(vm.on_camera_error());
        assert!(!vm.on_camera_error());
        assert!(!vm.on_decode_event(Some(VALID_QR)));
        assert_eq!(vm.scan_result(), Some(ScanResult::Error(MSG_CAMERA_ERROR.to_string())));
        assert_eq!(harness.camera.stop_count(), 1);
    }

    #[test]
    fn test_camera_error_before_gate_arms_is_reported() {
        let harness = Harness::logged_in();
        let vm = scan_vm(&harness);
        vm.start_scan();

        assert!(vm.on_camera_error());
        assert_eq!(vm.phase(), ScanPhase::Decoded);
        assert_eq!(vm.scan_result(), Some(ScanResult::Error(MSG_CAMERA_ERROR.to_string())));

        // El armado pendiente ya no abre el gate
        harness.scheduler.run_all();
        assert!(!vm.on_decode_event(Some(VALID_QR)));
        assert_eq!(vm.scan_result(), Some(ScanResult::Error(MSG_CAMERA_ERROR.to_string())));
    }

    #[test]
    fn test_camera_error_outside_scanning_is_ignored() {
        let harness = Harness::logged_in();
        let vm = scan_vm(&harness);

        assert!(!vm.on_camera_error());
        assert!(vm.scan_result().is_none());
        assert_eq!(harness.camera.stop_count(), 0);
    }

    #[test]
    fn test_accepted_decode_stops_camera() {
        let harness = Harness::logged_in();
        let vm = armed(&harness);

        assert!(vm.on_decode_event(Some(VALID_QR)));
        assert!(!vm.on_decode_event(Some(VALID_QR)));
        assert_eq!(harness.camera.stop_count(), 1);
    }

    #[test]
    fn test_logout_mid_scan_rejects_late_decode() {
        let harness = Harness::logged_in();
        let vm = armed(&harness);

        vm.auth.logout();

        assert_eq!(harness.camera.stop_count(), 1);
        assert!(!vm.on_decode_event(Some(VALID_QR)));
        assert!(vm.scan_result().is_none());
        assert_eq!(vm.phase(), ScanPhase::Idle);
        assert_eq!(harness.api.call_count(), 0);
    }

    #[test]
    fn test_camera_session_is_invalidated_by_cancel_and_rescan() {
        let harness = Harness::logged_in();
        let vm = scan_vm(&harness);

        vm.start_scan();
        let first = vm.camera_session();
        assert!(vm.should_start_camera(first));

        vm.cancel_scan();
        assert!(!vm.should_start_camera(first));

        vm.start_scan();
        let second = vm.camera_session();
        assert!(!vm.should_start_camera(first));
        assert!(vm.should_start_camera(second));

        vm.auth.logout();
        assert!(!vm.should_start_camera(second));
    }
}
