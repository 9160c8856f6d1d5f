use crate::ingress::IngressConfig;
use anyhow::{Result, bail};

/// Validate an ingress or certificate name.
///
/// Names become file names under the managed `conf.d`/`ssl` directories,
/// so the character set is restricted to lowercase `[a-z0-9-]`, max 63
/// chars, no leading/trailing hyphens. `.`, `_`, and `/` are rejected
/// outright: a name can never traverse a directory or collide with the
/// `.conf`/`.pem` suffix.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("name must not be empty");
    }
    if name.len() > 63 {
        bail!("name '{}' exceeds 63 characters (got {})", name, name.len());
    }
    if name.starts_with('-') || name.ends_with('-') {
        bail!("name '{}' must not start or end with a hyphen", name);
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        bail!(
            "name '{}' must contain only lowercase letters, digits, and hyphens [a-z0-9-]",
            name
        );
    }
    Ok(())
}

/// Validate the cross-field invariants of an ingress configuration.
///
/// - every upstream holds at least one server (routes with no endpoints
///   must go through [`crate::upstream::Upstream::with_default_server`]);
/// - a TLS-enabled server carries both a certificate and a key path.
pub fn validate_ingress(config: &IngressConfig) -> Result<()> {
    for upstream in &config.upstreams {
        if upstream.upstream_servers.is_empty() {
            bail!(
                "upstream '{}' has no servers; use Upstream::with_default_server for routes without endpoints",
                upstream.name
            );
        }
    }
    for server in &config.servers {
        if server.ssl
            && (server.ssl_certificate.is_empty() || server.ssl_certificate_key.is_empty())
        {
            bail!(
                "server '{}' enables ssl but is missing a certificate or key path",
                server.name
            );
        }
        for location in &server.locations {
            if location.upstream.upstream_servers.is_empty() {
                bail!(
                    "location '{}' of server '{}' references empty upstream '{}'",
                    location.path,
                    server.name,
                    location.upstream.name
                );
            }
        }
    }
    Ok(())
}
