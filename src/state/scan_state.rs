// ============================================================================
// SCAN STATE - Estado del flujo de escaneo/verificación
// ============================================================================
// QrStatus y VerifyMessage solo existen mientras hay ScanResult y se
// descartan junto con él.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::{FlashMessage, QrStatus, ScanPayload, ScanResult};

/// Fase de la máquina de estados
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Scanning,
    Decoded,
    CheckingStatus,
    StatusKnown,
    Verifying,
    Verified,
}

#[derive(Clone)]
pub struct ScanState {
    pub phase: Rc<Cell<ScanPhase>>,
    pub scan_result: Rc<RefCell<Option<ScanResult>>>,
    pub qr_status: Rc<RefCell<Option<QrStatus>>>,
    pub verify_message: Rc<RefCell<Option<FlashMessage>>>,
    /// Generación del escaneo: las respuestas de una generación vieja se descartan
    generation: Rc<Cell<u64>>,
}

impl ScanState {
    pub fn new() -> Self {
        Self {
            phase: Rc::new(Cell::new(ScanPhase::Idle)),
            scan_result: Rc::new(RefCell::new(None)),
            qr_status: Rc::new(RefCell::new(None)),
            verify_message: Rc::new(RefCell::new(None)),
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase.get()
    }

    pub fn set_phase(&self, phase: ScanPhase) {
        self.phase.set(phase);
    }

    pub fn get_scan_result(&self) -> Option<ScanResult> {
        self.scan_result.borrow().clone()
    }

    /// Un ScanResult nuevo reemplaza todo el estado derivado
    pub fn set_scan_result(&self, result: ScanResult) {
        *self.scan_result.borrow_mut() = Some(result);
        *self.qr_status.borrow_mut() = None;
        *self.verify_message.borrow_mut() = None;
    }

    /// Payload si el resultado actual es válido
    pub fn payload(&self) -> Option<ScanPayload> {
        self.scan_result.borrow().as_ref().and_then(|r| r.payload().cloned())
    }

    pub fn get_qr_status(&self) -> Option<QrStatus> {
        self.qr_status.borrow().clone()
    }

    pub fn set_qr_status(&self, status: Option<QrStatus>) {
        *self.qr_status.borrow_mut() = status;
    }

    pub fn get_verify_message(&self) -> Option<FlashMessage> {
        self.verify_message.borrow().clone()
    }

    pub fn set_verify_message(&self, message: Option<FlashMessage>) {
        *self.verify_message.borrow_mut() = message;
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    /// Descartar resultado + estado derivado y abrir una generación nueva
    pub fn reset(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        self.phase.set(ScanPhase::Idle);
        *self.scan_result.borrow_mut() = None;
        *self.qr_status.borrow_mut() = None;
        *self.verify_message.borrow_mut() = None;
    }
}

impl Default for ScanState {
    fn default() -> Self {
        Self::new()
    }
}
