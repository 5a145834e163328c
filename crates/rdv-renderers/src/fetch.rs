//! Blocking HTTP implementation of the fetch capability.

use std::time::Duration;

use serde_json::Value;
use ureq::Agent;

use rdv_registry::{DataFetch, RenderError};

/// Default timeout for auxiliary requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`DataFetch`] backed by a pooled [`ureq::Agent`].
///
/// Blocking by design; renderers drive it through `spawn_blocking`. The
/// agent reuses connections across calls, so one `HttpFetch` shared via
/// the host capabilities serves all renderers of a bridge.
pub struct HttpFetch {
    agent: Agent,
}

impl HttpFetch {
    /// Create a fetcher with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a global request timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Default for HttpFetch {
    fn default() -> Self {
        Self::new()
    }
}

impl DataFetch for HttpFetch {
    fn get_json(&self, url: &str) -> Result<Value, RenderError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| RenderError::Fetch {
                url: url.to_owned(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let detail = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(RenderError::Fetch {
                url: url.to_owned(),
                message: format!("HTTP {status}: {detail}"),
            });
        }

        body.read_json().map_err(|e| RenderError::Fetch {
            url: url.to_owned(),
            message: e.to_string(),
        })
    }
}
