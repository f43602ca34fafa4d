// ============================================================================
// SCHEDULER - Timers de UI (retardos fijos, no son deadlines de red)
// ============================================================================

use gloo_timers::callback::Timeout;

/// Ejecuta una tarea después de `delay_ms`
pub trait Scheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Scheduler del navegador (setTimeout vía gloo-timers)
#[derive(Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        // forget(): el timer debe sobrevivir a este scope
        Timeout::new(delay_ms, task).forget();
    }
}
