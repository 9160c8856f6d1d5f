use crate::upstream::Upstream;
use pkg_constants::nginx;
use serde::{Deserialize, Serialize};

/// A path-matching rule inside a server block, bound to one upstream pool.
///
/// Owns its `Upstream` by value; pools are not shared between locations
/// unless the caller deliberately duplicates the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    pub upstream: Upstream,
    #[serde(default = "default_proxy_connect_timeout")]
    pub proxy_connect_timeout: String,
    #[serde(default = "default_proxy_read_timeout")]
    pub proxy_read_timeout: String,
    #[serde(default = "default_client_max_body_size")]
    pub client_max_body_size: String,
    /// Emit the HTTP/1.1 upgrade headers needed for websocket proxying.
    #[serde(default)]
    pub websocket: bool,
}

impl Location {
    /// Location with the stock per-route proxy settings.
    pub fn new(path: impl Into<String>, upstream: Upstream) -> Self {
        Self {
            path: path.into(),
            upstream,
            proxy_connect_timeout: default_proxy_connect_timeout(),
            proxy_read_timeout: default_proxy_read_timeout(),
            client_max_body_size: default_client_max_body_size(),
            websocket: false,
        }
    }
}

fn default_proxy_connect_timeout() -> String {
    nginx::DEFAULT_PROXY_CONNECT_TIMEOUT.to_string()
}

fn default_proxy_read_timeout() -> String {
    nginx::DEFAULT_PROXY_READ_TIMEOUT.to_string()
}

fn default_client_max_body_size() -> String {
    nginx::DEFAULT_CLIENT_MAX_BODY_SIZE.to_string()
}

/// One virtual-host definition: a host name, its locations in match
/// order, and optional TLS termination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub name: String,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub ssl: bool,
    /// Path to the certificate bundle. Required when `ssl` is set.
    #[serde(default)]
    pub ssl_certificate: String,
    /// Path to the private key. Required when `ssl` is set.
    #[serde(default)]
    pub ssl_certificate_key: String,
}

impl Server {
    /// Plain (non-TLS) server.
    pub fn new(name: impl Into<String>, locations: Vec<Location>) -> Self {
        Self {
            name: name.into(),
            locations,
            ssl: false,
            ssl_certificate: String::new(),
            ssl_certificate_key: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_defaults() {
        let loc = Location::new("/", Upstream::with_default_server("svc"));
        assert_eq!(loc.proxy_connect_timeout, "60s");
        assert_eq!(loc.proxy_read_timeout, "60s");
        assert_eq!(loc.client_max_body_size, "1m");
        assert!(!loc.websocket);
    }

    #[test]
    fn location_defaults_apply_when_deserialized() {
        let loc: Location = serde_json::from_str(
            r#"{"path": "/api", "upstream": {"name": "svc", "upstream_servers": []}}"#,
        )
        .unwrap();
        assert_eq!(loc.proxy_read_timeout, "60s");
        assert_eq!(loc.client_max_body_size, "1m");
    }
}
