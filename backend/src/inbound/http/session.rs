//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie holds only a session identifier; the typed [`SessionToken`]
//! record lives in the process-held [`SessionRegistry`]. Handlers persist a
//! record after sign-in, resolve a usable bearer token before touching the
//! record store, and revoke the record on logout.

mod registry;

pub use registry::SessionRegistry;

use std::sync::Arc;

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use chrono::{DateTime, Utc};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use crate::domain::{BearerToken, Error, SessionToken};
use crate::inbound::http::state::HttpState;

pub(crate) const SESSION_ID_KEY: &str = "session_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext {
    session: Session,
    registry: Arc<SessionRegistry>,
}

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session, registry: Arc<SessionRegistry>) -> Self {
        Self { session, registry }
    }

    fn session_id(&self) -> Option<Uuid> {
        match self.session.get::<Uuid>(SESSION_ID_KEY) {
            Ok(id) => id,
            Err(error) => {
                tracing::warn!("unreadable session cookie: {error}");
                None
            }
        }
    }

    /// Open a session for `record`, revoking any session the cookie held.
    pub fn persist_token(&self, record: SessionToken, now: DateTime<Utc>) -> Result<(), Error> {
        if let Some(previous) = self.session_id() {
            self.registry.revoke(&previous);
        }
        let id = self.registry.open(record, now);
        self.session.renew();
        self.session.insert(SESSION_ID_KEY, id).map_err(|error| {
            self.registry.revoke(&id);
            Error::internal(format!("failed to persist session: {error}"))
        })
    }

    /// Fetch the session record, if the cookie names an open session.
    pub fn session_token(&self) -> Option<SessionToken> {
        self.session_id().and_then(|id| self.registry.lookup(&id))
    }

    /// Require a usable bearer token or return `401 Unauthorized`.
    ///
    /// Expired or revoked sessions are purged so the caller's cookie is
    /// cleared.
    pub fn require_token(&self, now: DateTime<Utc>) -> Result<BearerToken, Error> {
        let id = self.session_id();
        let record = id.as_ref().and_then(|id| self.registry.lookup(id));
        match (&id, &record) {
            (Some(id), Some(found)) if found.is_expired(now) => {
                self.registry.revoke(id);
                self.session.purge();
            }
            (Some(_), None) => self.session.purge(),
            _ => {}
        }
        SessionToken::current_token(record.as_ref(), now)
    }

    /// Revoke the session and clear the cookie.
    pub fn sign_out(&self) {
        if let Some(id) = self.session_id() {
            self.registry.revoke(&id);
        }
        self.session.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let registry = req
            .app_data::<web::Data<HttpState>>()
            .map(|state| Arc::clone(&state.sessions));
        let fut = Session::from_request(req, payload);
        Box::pin(async move {
            let session = fut.await?;
            let registry =
                registry.ok_or_else(|| Error::internal("session registry not configured"))?;
            Ok(SessionContext::new(session, registry))
        })
    }
}
