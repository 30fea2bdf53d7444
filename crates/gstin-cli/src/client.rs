//! HTTP client for the GSTIN details endpoint.
//!
//! One GET per call: no retries, no caching. The status and body are handed
//! to [`gstin_core::classify_response`], so everything past the transport is
//! decided by the core crate.
use std::time::{Duration, Instant};

use gstin_core::{Gstin, LookupError, RawResponse, classify_response};

use crate::config::ApiConfig;
use crate::error::CliError;

const KEY_HEADER: &str = "x-rapidapi-key";
const HOST_HEADER: &str = "x-rapidapi-host";

/// Issues lookups against the configured API.
#[derive(Debug)]
pub struct LookupClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl LookupClient {
    /// Builds the client. The timeout is applied only when configured.
    ///
    /// # Errors
    ///
    /// [`CliError::ClientInit`] if the TLS backend cannot be initialised.
    pub fn new(config: ApiConfig) -> Result<Self, CliError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| CliError::ClientInit {
            detail: e.to_string(),
        })?;
        Ok(Self { http, config })
    }

    /// Fetches the registration details for `gstin`.
    ///
    /// # Errors
    ///
    /// - [`LookupError::Transport`] when no response arrives (bad URL, DNS,
    ///   connection, timeout, or a header value that is not valid HTTP).
    /// - Any error from [`classify_response`] for the response received.
    pub async fn lookup(&self, gstin: &Gstin) -> Result<RawResponse, LookupError> {
        let url = self.config.endpoint(gstin)?;
        tracing::debug!(gstin = %gstin, url = %url, "sending lookup request");
        let started = Instant::now();

        let response = self
            .http
            .get(url)
            .header(KEY_HEADER, self.config.api_key.as_str())
            .header(HOST_HEADER, self.config.api_host.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::debug!(gstin = %gstin, status, elapsed_ms, bytes = body.len(), "lookup response");

        let outcome = classify_response(status, &body);
        if let Err(e) = &outcome {
            tracing::debug!(gstin = %gstin, status, error = %e, "lookup rejected");
        }
        outcome
    }
}

fn transport_error(e: reqwest::Error) -> LookupError {
    let detail = if e.is_timeout() {
        format!("request timed out: {e}")
    } else {
        e.to_string()
    };
    tracing::debug!(error = %detail, "lookup transport failure");
    LookupError::Transport { detail }
}
