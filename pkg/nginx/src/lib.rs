//! NGINX configuration lifecycle management.
//!
//! Turns routing intent ([`pkg_types::ingress::IngressConfig`]) into
//! on-disk nginx configuration, persists TLS certificate bundles, and
//! drives the nginx process through a validate-then-reload protocol so a
//! malformed configuration never disrupts live traffic.

pub mod backend;
pub mod certs;
pub mod controller;
pub mod error;
pub mod process;
pub mod sync;
pub mod template;

pub use backend::{DryRunEffects, Effects, HostEffects};
pub use controller::NginxController;
pub use error::NginxError;
