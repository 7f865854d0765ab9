//! Client configuration.

use std::env;
use std::time::Duration;

use reqwest::Client;
use tracing::warn;

use ogc_common::{OgcError, OgcResult};

use crate::fetch::ReqwestTransport;

/// Settings for the default HTTP transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Total request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub user_agent: String,
    /// Headers sent with every request.
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            user_agent: format!("ogcapi-client/{}", env!("CARGO_PKG_VERSION")),
            default_headers: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `OGCAPI_TIMEOUT_SECS` and `OGCAPI_USER_AGENT`.
    ///
    /// A timeout of `0` disables the timeout. Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = env::var("OGCAPI_TIMEOUT_SECS") {
            match value.trim().parse::<u64>() {
                Ok(0) => config.timeout = None,
                Ok(secs) => config.timeout = Some(Duration::from_secs(secs)),
                Err(_) => warn!(value = %value, "Ignoring invalid OGCAPI_TIMEOUT_SECS"),
            }
        }

        if let Ok(agent) = env::var("OGCAPI_USER_AGENT") {
            if !agent.trim().is_empty() {
                config.user_agent = agent;
            }
        }

        config
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Build the reqwest-backed transport.
    pub fn build_transport(&self) -> OgcResult<ReqwestTransport> {
        let mut builder = Client::builder().user_agent(self.user_agent.clone());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| OgcError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(ReqwestTransport::new(client).with_default_headers(self.default_headers.clone()))
    }
}
