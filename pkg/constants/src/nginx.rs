//! nginx command lines, template identifiers, and render defaults.

// ─── Commands ─────────────────────────────────────────────────────────────

/// Start nginx as a daemon.
pub const START_COMMAND: &str = "nginx";

/// Syntax-check the on-disk configuration without touching the process.
pub const VERIFY_COMMAND: &str = "nginx -t";

/// Signal the running master process to re-read its configuration.
pub const RELOAD_COMMAND: &str = "nginx -s reload";

/// Print the nginx version banner (written to stderr).
pub const VERSION_COMMAND: &str = "nginx -v";

// ─── Templates ────────────────────────────────────────────────────────────

/// Template identifier for one ingress configuration unit.
pub const INGRESS_TEMPLATE: &str = "ingress.tmpl";

/// Template identifier for the main nginx configuration file.
pub const MAIN_TEMPLATE: &str = "nginx.conf.tmpl";

// ─── Sentinel upstream ────────────────────────────────────────────────────

/// Address of the sentinel backend used when a route has no live endpoints.
/// Nothing listens here; `proxy_pass` to it fails fast with 502.
pub const DEFAULT_UPSTREAM_ADDRESS: &str = "127.0.0.1";

/// Port of the sentinel backend.
pub const DEFAULT_UPSTREAM_PORT: &str = "8181";

// ─── Render defaults ──────────────────────────────────────────────────────

/// Default `proxy_connect_timeout` for a location.
pub const DEFAULT_PROXY_CONNECT_TIMEOUT: &str = "60s";

/// Default `proxy_read_timeout` for a location.
pub const DEFAULT_PROXY_READ_TIMEOUT: &str = "60s";

/// Default `client_max_body_size` for a location.
pub const DEFAULT_CLIENT_MAX_BODY_SIZE: &str = "1m";

/// Default `server_names_hash_max_size` in the main configuration.
pub const DEFAULT_SERVER_NAMES_HASH_MAX_SIZE: &str = "512";
