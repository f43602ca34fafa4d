// ============================================================================
// SCAN GATE - Admite como máximo UNA lectura de cámara por sesión de escaneo
// ============================================================================
// El decoder puede llamar su callback varias veces con el mismo frame antes
// de que la UI reaccione. El check-and-close es un único `Cell::replace`
// sin ningún await en medio: dos eventos seguidos nunca pasan los dos.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::models::ScanResult;
use crate::utils::Scheduler;

/// Ticket de armado: solo el último ticket emitido puede abrir el gate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArmTicket(u64);

#[derive(Clone, Default)]
pub struct ScanGate {
    open: Rc<Cell<bool>>,
    arm_epoch: Rc<Cell<u64>>,
}

impl ScanGate {
    /// Gate cerrado
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Programar la apertura tras `delay_ms` (el stream de la cámara se estabiliza
    /// y no reaccionamos a un frame viejo de la sesión anterior)
    pub fn open_gate(&self, scheduler: &dyn Scheduler, delay_ms: u32) {
        let ticket = self.begin_arming();
        let gate = self.clone();
        scheduler.after(
            delay_ms,
            Box::new(move || {
                if gate.arm(ticket) {
                    log::debug!("🔓 [GATE] Gate abierto");
                } else {
                    log::debug!("🔒 [GATE] Ticket caducado, el gate sigue cerrado");
                }
            }),
        );
    }

    /// Cerrar e invalidar cualquier apertura pendiente
    pub fn begin_arming(&self) -> ArmTicket {
        self.open.set(false);
        let epoch = self.arm_epoch.get().wrapping_add(1);
        self.arm_epoch.set(epoch);
        ArmTicket(epoch)
    }

    /// Abrir si nadie cerró ni re-armó desde que se emitió el ticket
    pub fn arm(&self, ticket: ArmTicket) -> bool {
        if self.arm_epoch.get() != ticket.0 {
            return false;
        }
        self.open.set(true);
        true
    }

    /// Cancelación: volver a idle sin emitir resultado
    pub fn close_gate(&self) {
        self.arm_epoch.set(self.arm_epoch.get().wrapping_add(1));
        self.open.set(false);
    }

    /// Check-and-close indivisible. `true` solo para el primer llamador.
    pub fn try_accept(&self) -> bool {
        self.open.replace(false)
    }

    /// Evento del decoder. Payload vacío o gate cerrado = no-op.
    pub fn admit(&self, payload: Option<&str>) -> Option<ScanResult> {
        let text = payload.filter(|text| !text.is_empty())?;
        if !self.try_accept() {
            return None;
        }
        Some(ScanResult::from_decoded(text))
    }
}
