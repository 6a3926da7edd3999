//! URL construction shared by the HTTP adapters.

use thiserror::Error;
use url::Url;

/// Errors raised while constructing an HTTP adapter.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The configured base URL cannot have path segments appended.
    #[error("base URL `{0}` cannot carry a path")]
    CannotBeABase(String),
    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Append `segments` to the path of `base`, percent-encoding each one.
///
/// A trailing slash on `base` is dropped first so that `https://host/` and
/// `https://host` resolve to the same endpoint.
pub(crate) fn append_segments<'a>(
    base: &Url,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, ClientBuildError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ClientBuildError::CannotBeABase(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://db.example.test/", "https://db.example.test/Student/S1")]
    #[case("https://db.example.test", "https://db.example.test/Student/S1")]
    #[case("https://host.test/tenant/", "https://host.test/tenant/Student/S1")]
    fn appends_below_base_path(#[case] base: &str, #[case] expected: &str) {
        let base = Url::parse(base).expect("base url");
        let url = append_segments(&base, ["Student", "S1"]).expect("append");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn encodes_segment_content() {
        let base = Url::parse("https://db.example.test/").expect("base url");
        let url = append_segments(&base, ["Student", "A B?"]).expect("append");
        assert_eq!(url.as_str(), "https://db.example.test/Student/A%20B%3F");
    }

    #[rstest]
    fn rejects_opaque_base() {
        let base = Url::parse("mailto:records@example.test").expect("opaque url");
        let err = append_segments(&base, ["x"]).expect_err("cannot be a base");
        assert!(matches!(err, ClientBuildError::CannotBeABase(_)));
    }
}
