//! Process-held table of signed-in sessions.
//!
//! The session cookie carries only an opaque identifier. The bearer token and
//! its expiry stay in this table, so removing an entry revokes every copy of
//! the cookie that refers to it.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::SessionToken;

/// Signed-in sessions keyed by the identifier stored in the cookie.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    records: Mutex<HashMap<Uuid, SessionToken>>,
}

impl SessionRegistry {
    /// Store `record` under a fresh identifier.
    ///
    /// Entries already expired at `now` are dropped on the way in.
    pub fn open(&self, record: SessionToken, now: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        let mut records = self.records();
        records.retain(|_, existing| !existing.is_expired(now));
        records.insert(id, record);
        id
    }

    /// Record held under `id`, if that session is still open.
    pub fn lookup(&self, id: &Uuid) -> Option<SessionToken> {
        self.records().get(id).cloned()
    }

    /// Close the session under `id`. Returns whether it was open.
    pub fn revoke(&self, id: &Uuid) -> bool {
        self.records().remove(id).is_some()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<Uuid, SessionToken>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{Duration as ChronoDuration, TimeZone};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{BearerToken, IssuedToken};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn record(raw: &str, ttl_secs: u64, now: DateTime<Utc>) -> SessionToken {
        let issued = IssuedToken::new(
            BearerToken::new(raw).expect("token"),
            Some(Duration::from_secs(ttl_secs)),
        );
        SessionToken::issue(&issued, now)
    }

    #[rstest]
    fn revoked_session_is_no_longer_found(now: DateTime<Utc>) {
        let registry = SessionRegistry::default();
        let id = registry.open(record("token-abc", 3600, now), now);

        assert_eq!(registry.lookup(&id), Some(record("token-abc", 3600, now)));
        assert!(registry.revoke(&id));
        assert_eq!(registry.lookup(&id), None);
        assert!(!registry.revoke(&id));
    }

    #[rstest]
    fn each_sign_in_gets_its_own_identifier(now: DateTime<Utc>) {
        let registry = SessionRegistry::default();
        let first = registry.open(record("token-a", 3600, now), now);
        let second = registry.open(record("token-b", 3600, now), now);

        assert_ne!(first, second);
        registry.revoke(&first);
        assert!(registry.lookup(&second).is_some());
    }

    #[rstest]
    fn opening_drops_expired_sessions(now: DateTime<Utc>) {
        let registry = SessionRegistry::default();
        let stale = registry.open(record("token-old", 60, now), now);

        let later = now + ChronoDuration::hours(1);
        let fresh = registry.open(record("token-new", 3600, later), later);

        assert_eq!(registry.lookup(&stale), None);
        assert!(registry.lookup(&fresh).is_some());
    }
}
