//! Typed session record binding a bearer token to a caller.
//!
//! The record is what the inbound session adapter persists; the accessor
//! [`SessionToken::current_token`] is the single place that decides whether
//! a caller is authorised to reach the record store.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};

use super::{BearerToken, Error, IssuedToken};

/// Session record `{token, expiresAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
}

impl SessionToken {
    /// Build the record for a freshly issued token.
    ///
    /// A lifetime that does not fit in a chrono duration is treated as
    /// non-expiring rather than rejected.
    pub fn issue(issued: &IssuedToken, now: DateTime<Utc>) -> Self {
        let expires_at = issued
            .expires_in()
            .and_then(|ttl| ChronoDuration::from_std(ttl).ok())
            .and_then(|ttl| now.checked_add_signed(ttl));
        Self {
            token: Some(issued.token().as_str().to_owned()),
            expires_at,
        }
    }

    /// Instant after which the token is no longer presented.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Whether the record has passed its expiry at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }

    /// Return the usable bearer token or `Unauthorized`.
    ///
    /// Absent, blank, and expired tokens are all treated as "not signed in".
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use records_backend::domain::{ErrorCode, SessionToken};
    ///
    /// let err = SessionToken::current_token(None, Utc::now()).unwrap_err();
    /// assert_eq!(err.code(), ErrorCode::Unauthorized);
    /// ```
    pub fn current_token(session: Option<&Self>, now: DateTime<Utc>) -> Result<BearerToken, Error> {
        let Some(record) = session else {
            return Err(Error::unauthorized("login required"));
        };
        if record.is_expired(now) {
            return Err(Error::unauthorized("session expired; login again"));
        }
        record
            .token
            .as_deref()
            .and_then(|raw| BearerToken::new(raw).ok())
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::time::Duration;

    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ErrorCode;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn issued(ttl: Option<u64>) -> IssuedToken {
        IssuedToken::new(
            BearerToken::new("token-abc").expect("token"),
            ttl.map(Duration::from_secs),
        )
    }

    #[rstest]
    fn issue_records_expiry_from_lifetime(now: DateTime<Utc>) {
        let record = SessionToken::issue(&issued(Some(3600)), now);
        assert_eq!(record.expires_at(), Some(now + ChronoDuration::hours(1)));
        let token = SessionToken::current_token(Some(&record), now).expect("token usable");
        assert_eq!(token.as_str(), "token-abc");
    }

    #[rstest]
    fn token_without_lifetime_never_expires(now: DateTime<Utc>) {
        let record = SessionToken::issue(&issued(None), now);
        let later = now + ChronoDuration::days(365);
        assert!(SessionToken::current_token(Some(&record), later).is_ok());
    }

    #[rstest]
    #[case(ChronoDuration::hours(1))]
    #[case(ChronoDuration::hours(2))]
    fn expired_token_is_unauthorised(now: DateTime<Utc>, #[case] elapsed: ChronoDuration) {
        let record = SessionToken::issue(&issued(Some(3600)), now);
        let err = SessionToken::current_token(Some(&record), now + elapsed)
            .expect_err("expired token");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn blank_token_is_unauthorised(now: DateTime<Utc>) {
        let record: SessionToken =
            serde_json::from_value(serde_json::json!({ "token": "" })).expect("decode");
        let err = SessionToken::current_token(Some(&record), now).expect_err("blank token");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn serialises_with_camel_case_expiry(now: DateTime<Utc>) {
        let record = SessionToken::issue(&issued(Some(60)), now);
        let value = serde_json::to_value(&record).expect("encode");
        assert_eq!(value["token"], "token-abc");
        assert!(value.get("expiresAt").is_some());
    }
}
