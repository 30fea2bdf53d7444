//! Lookup API configuration.
//!
//! Values come from the `--api-*` flags or their environment variables. The
//! key and host are not checked for presence: an empty value is sent as-is
//! and the API rejects it.
use gstin_core::{Gstin, LookupError};
use url::Url;

use crate::cli::ApiArgs;

/// Settings for the lookup API.
///
/// Custom `Debug` implementation redacts the `api_key` field so the key
/// never reaches log output.
#[derive(Clone)]
pub struct ApiConfig {
    /// Sent in the `x-rapidapi-key` header.
    pub api_key: String,
    /// Sent in the `x-rapidapi-host` header; also the default base URL host.
    pub api_host: String,
    /// Overrides `https://{api_host}`.
    pub base_url: Option<Url>,
    /// Request timeout; `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_host", &self.api_host)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl From<ApiArgs> for ApiConfig {
    fn from(args: ApiArgs) -> Self {
        Self {
            api_key: args.api_key,
            api_host: args.api_host,
            base_url: args.base_url,
            timeout_secs: args.timeout_secs,
        }
    }
}

impl ApiConfig {
    /// The base URL requests are sent to.
    ///
    /// # Errors
    ///
    /// [`LookupError::Transport`] when no base URL is configured and
    /// `https://{api_host}` does not parse (e.g. the host is empty).
    pub fn base(&self) -> Result<Url, LookupError> {
        if let Some(url) = &self.base_url {
            return Ok(url.clone());
        }
        let raw = format!("https://{}", self.api_host);
        Url::parse(&raw).map_err(|e| LookupError::Transport {
            detail: format!("invalid lookup URL {raw:?}: {e}"),
        })
    }

    /// The details endpoint for `gstin`: `{base}/v1/gstin/{GSTIN}/details`.
    ///
    /// A path on the base URL is kept as a prefix.
    ///
    /// # Errors
    ///
    /// [`LookupError::Transport`] if the base URL is unusable.
    pub fn endpoint(&self, gstin: &Gstin) -> Result<Url, LookupError> {
        let mut url = self.base()?;
        let shown = url.to_string();
        url.path_segments_mut()
            .map_err(|()| LookupError::Transport {
                detail: format!("lookup base URL cannot carry a path: {shown}"),
            })?
            .pop_if_empty()
            .extend(["v1", "gstin", gstin.as_str(), "details"]);
        Ok(url)
    }
}
