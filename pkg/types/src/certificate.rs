use serde::{Deserialize, Serialize};

/// TLS certificate and private key persisted as one `.pem` bundle.
///
/// Identity is the name; re-upserting the same name replaces the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateBundle {
    pub name: String,
    /// PEM-encoded certificate (chain).
    pub cert: String,
    /// PEM-encoded private key.
    pub key: String,
}

impl CertificateBundle {
    pub fn new(
        name: impl Into<String>,
        cert: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cert: cert.into(),
            key: key.into(),
        }
    }
}
