//! Reqwest-backed record store adapter.
//!
//! Each [`StorePath`] maps to `{base}/{segments}.json`. The caller's token,
//! when present, is sent as the `auth` query parameter; the store decides
//! what a missing or stale token may do.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use url::Url;

use crate::domain::ports::{RecordStore, RecordStoreError};
use crate::domain::{BearerToken, StorePath};
use crate::outbound::ClientBuildError;
use crate::outbound::body_preview::status_message;
use crate::outbound::endpoint::append_segments;

const NODE_SUFFIX: &str = ".json";

/// Record store adapter speaking the hosted realtime database REST API.
#[derive(Debug, Clone)]
pub struct RealtimeDatabaseClient {
    client: Client,
    base_url: Url,
}

impl RealtimeDatabaseClient {
    /// Build an adapter rooted at `base_url` with a per-request timeout.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ClientBuildError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientBuildError::CannotBeABase(base_url.to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn node_url(&self, path: &StorePath) -> Result<Url, RecordStoreError> {
        let mut segments: Vec<String> = path.segments().map(str::to_owned).collect();
        if let Some(last) = segments.last_mut() {
            last.push_str(NODE_SUFFIX);
        }
        append_segments(&self.base_url, segments.iter().map(String::as_str))
            .map_err(|err| RecordStoreError::transport(err.to_string()))
    }

    async fn send(
        &self,
        request: RequestBuilder,
        token: Option<&BearerToken>,
    ) -> Result<Vec<u8>, RecordStoreError> {
        let request = match token {
            Some(token) => request.query(&[("auth", token.as_str())]),
            None => request,
        };
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl RecordStore for RealtimeDatabaseClient {
    async fn get(
        &self,
        path: &StorePath,
        token: Option<&BearerToken>,
    ) -> Result<Option<Value>, RecordStoreError> {
        let url = self.node_url(path)?;
        let body = self.send(self.client.get(url), token).await?;
        decode_node(&body)
    }

    async fn set(
        &self,
        path: &StorePath,
        value: &Value,
        token: Option<&BearerToken>,
    ) -> Result<(), RecordStoreError> {
        let url = self.node_url(path)?;
        self.send(self.client.put(url).json(value), token).await?;
        Ok(())
    }

    async fn remove(
        &self,
        path: &StorePath,
        token: Option<&BearerToken>,
    ) -> Result<(), RecordStoreError> {
        let url = self.node_url(path)?;
        self.send(self.client.delete(url), token).await?;
        Ok(())
    }
}

/// URLs carry the caller's token, so they are stripped before rendering.
fn map_transport_error(error: reqwest::Error) -> RecordStoreError {
    if error.is_timeout() {
        return RecordStoreError::transport("request timed out");
    }
    RecordStoreError::transport(error.without_url().to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RecordStoreError {
    let message = status_message(status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RecordStoreError::unauthorized(message),
        _ => RecordStoreError::transport(message),
    }
}

/// The store answers `null` for nodes that hold nothing.
fn decode_node(body: &[u8]) -> Result<Option<Value>, RecordStoreError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|err| RecordStoreError::decode(err.to_string()))?;
    Ok((!value.is_null()).then_some(value))
}
