// Fakes para tests: API guionada, scheduler manual y contexto listo.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::Value;
use tokio::sync::oneshot;

use crate::config::TimerConfig;
use crate::error::ApiError;
use crate::models::{AdminCredential, ApiReply, LoginRequest, QrRequest, SendPassRequest};
use crate::services::AdminApi;
use crate::utils::{Camera, MemorySessionStore, Scheduler, SessionStore};
use crate::viewmodels::AppContext;

/// Guarda las tareas en vez de ejecutarlas; el test decide cuándo "pasa el tiempo"
#[derive(Default)]
pub struct ManualScheduler {
    tasks: RefCell<Vec<(u32, Box<dyn FnOnce()>)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_delays(&self) -> Vec<u32> {
        self.tasks.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    pub fn run_all(&self) {
        let tasks: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
        for (_, task) in tasks {
            task();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push((delay_ms, task));
    }
}

/// Cuenta las veces que se pidió parar la cámara
#[derive(Default)]
pub struct RecordingCamera {
    stops: Cell<usize>,
}

impl RecordingCamera {
    pub fn stop_count(&self) -> usize {
        self.stops.get()
    }
}

impl Camera for RecordingCamera {
    fn stop(&self) {
        self.stops.set(self.stops.get() + 1);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Login { admin_key: String },
    QrStatus { token: String, qr_data: String },
    QrVerify { token: String, qr_data: String },
    GivePass { token: String, email: String },
}

/// API con respuestas encoladas. Sin respuesta encolada devuelve 500.
#[derive(Default)]
pub struct MockApi {
    replies: RefCell<VecDeque<Result<ApiReply, ApiError>>>,
    calls: RefCell<Vec<MockCall>>,
    hold: RefCell<Option<oneshot::Receiver<()>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, status: u16, body: Option<Value>) {
        self.replies.borrow_mut().push_back(Ok(ApiReply::new(status, body)));
    }

    pub fn push_error(&self, error: ApiError) {
        self.replies.borrow_mut().push_back(Err(error));
    }

    /// La próxima llamada queda suspendida hasta que se envíe por el sender
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.hold.borrow_mut() = Some(rx);
        tx
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    async fn respond(&self, call: MockCall) -> Result<ApiReply, ApiError> {
        self.calls.borrow_mut().push(call);
        let hold = self.hold.borrow_mut().take();
        if let Some(rx) = hold {
            let _ = rx.await;
        }
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiReply::new(500, None)))
    }
}

impl AdminApi for MockApi {
    async fn login(&self, request: &LoginRequest) -> Result<ApiReply, ApiError> {
        self.respond(MockCall::Login {
            admin_key: request.admin_key.clone(),
        })
        .await
    }

    async fn qr_status(&self, token: &str, request: &QrRequest) -> Result<ApiReply, ApiError> {
        self.respond(MockCall::QrStatus {
            token: token.to_string(),
            qr_data: request.qr_data.clone(),
        })
        .await
    }

    async fn qr_verify(&self, token: &str, request: &QrRequest) -> Result<ApiReply, ApiError> {
        self.respond(MockCall::QrVerify {
            token: token.to_string(),
            qr_data: request.qr_data.clone(),
        })
        .await
    }

    async fn give_pass(&self, token: &str, request: &SendPassRequest) -> Result<ApiReply, ApiError> {
        self.respond(MockCall::GivePass {
            token: token.to_string(),
            email: request.email.clone(),
        })
        .await
    }
}

pub struct Harness {
    pub ctx: AppContext<MockApi>,
    pub api: Rc<MockApi>,
    pub store: Rc<MemorySessionStore>,
    pub scheduler: Rc<ManualScheduler>,
    pub camera: Rc<RecordingCamera>,
}

impl Harness {
    pub fn new(store: MemorySessionStore) -> Self {
        let api = Rc::new(MockApi::new());
        let store = Rc::new(store);
        let scheduler = Rc::new(ManualScheduler::new());
        let camera = Rc::new(RecordingCamera::default());
        let ctx = AppContext::new(
            api.clone(),
            store.clone() as Rc<dyn SessionStore>,
            scheduler.clone() as Rc<dyn Scheduler>,
            camera.clone() as Rc<dyn Camera>,
            TimerConfig::default(),
        );
        Self {
            ctx,
            api,
            store,
            scheduler,
            camera,
        }
    }

    /// Admin ya autenticado y en la ruta del scanner
    pub fn logged_in() -> Self {
        let harness = Self::new(MemorySessionStore::with_credential("tok-123", "Riya"));
        harness.ctx.state.auth.set_credential(Some(AdminCredential {
            token: "tok-123".to_string(),
            name: "Riya".to_string(),
        }));
        harness.ctx.state.set_route(crate::router::Route::Scanner);
        harness
    }
}
