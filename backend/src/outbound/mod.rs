//! Outbound adapters implementing domain ports over HTTP.
//!
//! - **identity**: identity provider REST API (`accounts:signUp`,
//!   `accounts:signInWithPassword`)
//! - **store**: hierarchical JSON record store REST API (`{path}.json`)
//!
//! Adapters own transport details only: URL construction, timeouts, status
//! mapping, and JSON decoding. They contain no business logic.

mod body_preview;
mod endpoint;
pub mod identity;
pub mod store;

pub use endpoint::ClientBuildError;
