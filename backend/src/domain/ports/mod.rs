//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod authenticator;
mod entity_directory;
mod identity_provider;
mod record_store;

#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::Authenticator;
#[cfg(test)]
pub use entity_directory::MockEntityDirectory;
pub use entity_directory::{EntityAction, EntityDirectory, EntityOutcome};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError, InMemoryIdentityProvider};
pub use record_store::{InMemoryRecordStore, RecordStore, RecordStoreError};
