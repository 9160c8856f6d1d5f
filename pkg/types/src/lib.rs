//! Value types describing one nginx configuration: upstream pools,
//! virtual-host servers, path locations, the process-wide main config,
//! and TLS certificate bundles.
//!
//! Pure data: construction helpers only, no I/O.

pub mod certificate;
pub mod ingress;
pub mod main_config;
pub mod server;
pub mod upstream;
pub mod validate;
