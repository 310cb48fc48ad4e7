//! In-process collaborators for local runs and tests.

use crate::error::RegisterError;
use crate::ports::{Navigator, RegistrationService, SessionProvider};
use closetr_domain::account::{RegistrationRequest, RegistrationResult, SessionToken};
use closetr_domain::route::Route;
use fxhash::FxHashSet;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, info};

/// A settable "current session". Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemorySessions {
    current: Arc<RwLock<Option<SessionToken>>>,
}

impl MemorySessions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn signed_in(token: SessionToken) -> Self {
        let sessions = Self::new();
        sessions.sign_in(token);
        sessions
    }

    pub fn sign_in(&self, token: SessionToken) {
        *self.current.write() = Some(token);
    }

    pub fn sign_out(&self) {
        self.current.write().take();
    }

    #[must_use]
    pub fn current(&self) -> Option<SessionToken> {
        self.current.read().clone()
    }
}

impl SessionProvider for MemorySessions {
    async fn current_session(&self) -> Result<Option<SessionToken>, RegisterError> {
        Ok(self.current())
    }
}

/// Username directory. Registering a taken username reports a conflict;
/// a successful registration signs the new user in when sessions are attached.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    usernames: Arc<RwLock<FxHashSet<String>>>,
    sessions: Option<MemorySessions>,
}

impl MemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-registers `usernames`.
    #[must_use]
    pub fn with_taken<I, S>(self, usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.usernames.write().extend(usernames.into_iter().map(Into::into));
        self
    }

    /// Signs newly registered users into `sessions`.
    #[must_use]
    pub fn with_sessions(mut self, sessions: MemorySessions) -> Self {
        self.sessions = Some(sessions);
        self
    }

    #[must_use]
    pub fn contains(&self, username: &str) -> bool {
        self.usernames.read().contains(username)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.usernames.read().len()
    }
}

impl RegistrationService for MemoryDirectory {
    async fn register(&self, request: RegistrationRequest) -> Result<RegistrationResult, RegisterError> {
        let created = self.usernames.write().insert(request.username.clone());
        if !created {
            debug!(username = %request.username, "Username already registered");
            return Ok(RegistrationResult::username_taken());
        }

        if let Some(sessions) = &self.sessions {
            sessions.sign_in(SessionToken::new(format!("session:{}", request.username)));
        }
        info!(username = %request.username, "Account registered");

        Ok(RegistrationResult::created())
    }
}

/// Records every navigation instead of performing it. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    visited: Arc<Mutex<Vec<Route>>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn visited(&self) -> Vec<Route> {
        self.visited.lock().clone()
    }

    #[must_use]
    pub fn count(&self, route: Route) -> usize {
        self.visited.lock().iter().filter(|r| **r == route).count()
    }

    #[must_use]
    pub fn last(&self) -> Option<Route> {
        self.visited.lock().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        info!(%route, "Navigating");
        self.visited.lock().push(route);
    }
}
