use pkg_constants::nginx;
use serde::{Deserialize, Serialize};

/// One backend endpoint inside an upstream pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamServer {
    pub address: String,
    pub port: String,
}

impl UpstreamServer {
    pub fn new(address: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            port: port.into(),
        }
    }
}

/// Named pool of backend endpoints, referenced by locations as the
/// `proxy_pass` target. Never rendered empty; routes with no live
/// endpoints use [`Upstream::with_default_server`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upstream {
    pub name: String,
    #[serde(default)]
    pub upstream_servers: Vec<UpstreamServer>,
}

impl Upstream {
    pub fn new(name: impl Into<String>, upstream_servers: Vec<UpstreamServer>) -> Self {
        Self {
            name: name.into(),
            upstream_servers,
        }
    }

    /// Upstream holding the single sentinel server used when a route has
    /// no live endpoints. `proxy_pass` to it returns 502, which is the
    /// defined "no backend" response; an empty upstream block would be
    /// an nginx configuration error instead.
    pub fn with_default_server(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            upstream_servers: vec![UpstreamServer::new(
                nginx::DEFAULT_UPSTREAM_ADDRESS,
                nginx::DEFAULT_UPSTREAM_PORT,
            )],
        }
    }
}
