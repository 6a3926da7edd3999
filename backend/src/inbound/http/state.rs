//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{Authenticator, EntityDirectory};
use crate::inbound::http::session::SessionRegistry;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Sign-up and sign-in use cases.
    pub authenticator: Arc<dyn Authenticator>,
    /// Record create, read, and delete use cases.
    pub directory: Arc<dyn EntityDirectory>,
    /// Clock used for session expiry.
    pub clock: Arc<dyn Clock>,
    /// Process-held table of open sessions.
    pub sessions: Arc<SessionRegistry>,
}

impl HttpState {
    /// Construct state using the system clock.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use records_backend::domain::ports::{InMemoryIdentityProvider, InMemoryRecordStore};
    /// use records_backend::domain::{EntityDirectoryService, SessionAuthenticator};
    /// use records_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(SessionAuthenticator::new(Arc::new(InMemoryIdentityProvider::default()))),
    ///     Arc::new(EntityDirectoryService::new(Arc::new(InMemoryRecordStore::default()))),
    /// );
    /// let _directory = state.directory.clone();
    /// ```
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        directory: Arc<dyn EntityDirectory>,
    ) -> Self {
        Self::with_clock(authenticator, directory, Arc::new(DefaultClock))
    }

    /// Construct state with an explicit clock, for deterministic expiry.
    ///
    /// Each call starts an empty session registry.
    pub fn with_clock(
        authenticator: Arc<dyn Authenticator>,
        directory: Arc<dyn EntityDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            authenticator,
            directory,
            clock,
            sessions: Arc::new(SessionRegistry::default()),
        }
    }
}
