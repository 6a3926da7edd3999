//! Value parsers for individual session toggles.

use std::time::Duration;

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{
    BuildMode, DEFAULT_TTL_MINUTES, SAMESITE_ENV, SessionConfigError, TTL_MINUTES_ENV,
};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";
const TTL_EXPECTED: &str = "a positive number of minutes";

/// A boolean variable and the value applied when debug builds fall back.
pub(super) struct BoolToggle {
    name: &'static str,
    fallback: bool,
}

impl BoolToggle {
    pub(super) const fn new(name: &'static str, fallback: bool) -> Self {
        Self { name, fallback }
    }
}

/// Read a boolean toggle, then let `check` veto the parsed value.
pub(super) fn parse_bool_toggle<E, F>(
    env: &E,
    mode: BuildMode,
    toggle: BoolToggle,
    check: F,
) -> Result<bool, SessionConfigError>
where
    E: Env,
    F: FnOnce(bool, BuildMode) -> Result<bool, SessionConfigError>,
{
    let BoolToggle { name, fallback } = toggle;
    let Some(value) = env.string(name) else {
        return debug_warn_or_error(mode, fallback, SessionConfigError::MissingEnv { name }, || {
            warn!(fallback, "{name} not set; using fallback");
        });
    };
    match parse_bool(&value) {
        Some(flag) => check(flag, mode),
        None => {
            let error = SessionConfigError::InvalidEnv {
                name,
                value: value.clone(),
                expected: BOOL_EXPECTED,
            };
            debug_warn_or_error(mode, fallback, error, || {
                warn!(value = %value, fallback, "invalid {name}; using fallback");
            })
        }
    }
}

/// Read `SESSION_SAMESITE`; `None` is only accepted with a secure cookie.
pub(super) fn parse_same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(value) = env.string(SAMESITE_ENV) else {
        return debug_warn_or_error(
            mode,
            fallback,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
            || warn!("SESSION_SAMESITE not set; using default"),
        );
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => debug_warn_or_error(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it"),
        ),
        _ => {
            let error = SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            };
            debug_warn_or_error(mode, fallback, error, || {
                warn!(value = %value, "invalid SESSION_SAMESITE, using default");
            })
        }
    }
}

/// Read `SESSION_TTL_MINUTES`. Unset means the default in every mode.
pub(super) fn parse_ttl<E: Env>(env: &E, mode: BuildMode) -> Result<Duration, SessionConfigError> {
    let fallback = Duration::from_secs(DEFAULT_TTL_MINUTES * 60);
    let Some(value) = env.string(TTL_MINUTES_ENV) else {
        return Ok(fallback);
    };
    match value.trim().parse::<u64>() {
        Ok(minutes) if minutes > 0 => Ok(Duration::from_secs(minutes.saturating_mul(60))),
        _ => {
            let error = SessionConfigError::InvalidEnv {
                name: TTL_MINUTES_ENV,
                value: value.clone(),
                expected: TTL_EXPECTED,
            };
            debug_warn_or_error(mode, fallback, error, || {
                warn!(value = %value, "invalid SESSION_TTL_MINUTES, using default");
            })
        }
    }
}

/// Debug builds log and fall back; release builds fail.
fn debug_warn_or_error<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: impl FnOnce(),
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
