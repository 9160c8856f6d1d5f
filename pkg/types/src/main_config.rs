use pkg_constants::nginx;
use serde::{Deserialize, Serialize};

/// Process-wide settings for the main nginx configuration file.
///
/// One instance per running nginx; written with defaults when the
/// controller is constructed and replaced by explicit update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainConfig {
    /// `server_names_hash_bucket_size`; empty = let nginx pick.
    #[serde(default)]
    pub server_names_hash_bucket_size: String,
    /// `server_names_hash_max_size`.
    #[serde(default = "default_server_names_hash_max_size")]
    pub server_names_hash_max_size: String,
}

impl Default for MainConfig {
    fn default() -> Self {
        Self {
            server_names_hash_bucket_size: String::new(),
            server_names_hash_max_size: default_server_names_hash_max_size(),
        }
    }
}

fn default_server_names_hash_max_size() -> String {
    nginx::DEFAULT_SERVER_NAMES_HASH_MAX_SIZE.to_string()
}
