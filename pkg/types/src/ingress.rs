use crate::server::Server;
use crate::upstream::Upstream;
use serde::{Deserialize, Serialize};

/// Full configuration unit rendered to one file under `conf.d`.
///
/// Sequence order is significant: upstream and server blocks are rendered
/// in the order given here, and nginx match precedence follows the
/// rendered order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressConfig {
    #[serde(default)]
    pub upstreams: Vec<Upstream>,
    #[serde(default)]
    pub servers: Vec<Server>,
}
