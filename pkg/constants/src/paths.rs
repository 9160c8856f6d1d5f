//! Filesystem path constants.

// ─── Managed directories ──────────────────────────────────────────────────

/// Default base path of the managed nginx installation.
pub const DEFAULT_NGINX_CONF_PATH: &str = "/etc/nginx";

/// Subdirectory of the base path holding one `.conf` file per ingress.
pub const CONF_D_DIR: &str = "conf.d";

/// Subdirectory of the base path holding TLS certificate bundles.
pub const SSL_DIR: &str = "ssl";

// ─── Singleton files ──────────────────────────────────────────────────────

/// Well-known path of the main nginx configuration file.
pub const MAIN_CONFIG_PATH: &str = "/etc/nginx/nginx.conf";

/// Extension of per-ingress configuration files inside `CONF_D_DIR`.
pub const CONF_EXTENSION: &str = "conf";

/// Extension of certificate bundle files inside `SSL_DIR`.
pub const PEM_EXTENSION: &str = "pem";
