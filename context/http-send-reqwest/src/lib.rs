//! Reqwest-based HTTP sending implementation for xerosign.
//!
//! This crate provides `ReqwestHttpSend`, which implements the `HttpSend`
//! trait from `xerosign_core`. The OAuth token-exchange calls go through it;
//! it is not meant as a general purpose HTTP client.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use xerosign_core::{Error, HttpSend, Result};
use reqwest::{Client, Request};

/// Reqwest-based implementation of the `HttpSend` trait.
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::network("failed to send request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::network("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
