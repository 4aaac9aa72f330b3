//! Client construction parameters.

use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BASE_URL: &str = "http://localhost";

/// Where the FRM server lives and how to authenticate against it.
///
/// `base_url` is `scheme://host` without a port; the port is appended when
/// the client is built. Every field has a default, so a host application can
/// embed this in its own config file and only override what it needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub port: u16,
    /// Sent as `X-FRM-Authorization` on write endpoints.
    pub token: Option<String>,
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// `base_url` with trailing slashes removed and the port appended.
    pub fn api_base_url(&self) -> String {
        format!("{}:{}", self.base_url.trim_end_matches('/'), self.port)
    }
}
