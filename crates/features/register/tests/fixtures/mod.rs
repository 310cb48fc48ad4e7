#![allow(dead_code, unreachable_pub)]

use closetr_domain::account::{RegistrationRequest, RegistrationResult, SessionToken};
use closetr_domain::config::RegisterConfig;
use closetr_register::memory::{MemoryDirectory, MemorySessions, RecordingNavigator};
use closetr_register::{
    FieldId, FormView, RegisterError, RegisterForm, RegistrationService, SessionProvider,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Notify, watch};

pub type MemoryForm = RegisterForm<MemorySessions, MemoryDirectory, RecordingNavigator>;

pub fn config() -> RegisterConfig {
    RegisterConfig { request_timeout_ms: 1_000, session_timeout_ms: 1_000 }
}

pub fn memory_form(directory: MemoryDirectory) -> (MemoryForm, RecordingNavigator) {
    let navigator = RecordingNavigator::new();
    let form = RegisterForm::new(MemorySessions::new(), directory, navigator.clone(), &config());
    (form, navigator)
}

pub fn fill<S, R, N>(form: &mut RegisterForm<S, R, N>, values: [&str; FieldId::COUNT])
where
    S: SessionProvider,
    R: RegistrationService,
    N: closetr_register::Navigator,
{
    for (id, value) in FieldId::ALL.into_iter().zip(values) {
        form.input(id, value);
    }
}

/// Registry answering with a fixed result and counting calls.
#[derive(Debug, Clone)]
pub struct FixedRegistry {
    pub result: Result<RegistrationResult, &'static str>,
    pub calls: Arc<AtomicUsize>,
    pub last: Arc<Mutex<Option<RegistrationRequest>>>,
}

impl FixedRegistry {
    pub fn answering(result: RegistrationResult) -> Self {
        Self { result: Ok(result), calls: Arc::default(), last: Arc::default() }
    }

    pub fn failing(message: &'static str) -> Self {
        Self { result: Err(message), calls: Arc::default(), last: Arc::default() }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RegistrationService for FixedRegistry {
    async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegistrationResult, RegisterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock() = Some(request);
        self.result.map_err(|message| RegisterError::Transport {
            message: message.into(),
            context: None,
        })
    }
}

/// Registry that waits for `release` and records the form view seen while in flight.
#[derive(Debug, Clone)]
pub struct GatedRegistry {
    pub release: Arc<Notify>,
    pub observer: Arc<Mutex<Option<watch::Receiver<FormView>>>>,
    pub seen_in_flight: Arc<Mutex<Option<FormView>>>,
    pub result: RegistrationResult,
}

impl GatedRegistry {
    pub fn new(result: RegistrationResult) -> Self {
        Self {
            release: Arc::new(Notify::new()),
            observer: Arc::default(),
            seen_in_flight: Arc::default(),
            result,
        }
    }
}

impl RegistrationService for GatedRegistry {
    async fn register(
        &self,
        _request: RegistrationRequest,
    ) -> Result<RegistrationResult, RegisterError> {
        let seen = self.observer.lock().as_ref().map(|rx| rx.borrow().clone());
        *self.seen_in_flight.lock() = seen;
        self.release.notified().await;
        Ok(self.result)
    }
}

/// Session provider that never answers.
#[derive(Debug, Clone, Copy)]
pub struct SilentSessions;

impl SessionProvider for SilentSessions {
    async fn current_session(&self) -> Result<Option<SessionToken>, RegisterError> {
        std::future::pending().await
    }
}

/// Session provider whose lookup fails.
#[derive(Debug, Clone, Copy)]
pub struct BrokenSessions;

impl SessionProvider for BrokenSessions {
    async fn current_session(&self) -> Result<Option<SessionToken>, RegisterError> {
        Err(RegisterError::Transport { message: "session service offline".into(), context: None })
    }
}
