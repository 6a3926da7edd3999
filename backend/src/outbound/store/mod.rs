//! Record store outbound adapter.

mod http_client;

pub use http_client::RealtimeDatabaseClient;
