use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

use crate::health::HealthConfig;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub health: HealthConfig,
    /// Directory for per-request upload spool files
    ///
    /// Defaults to the system temp directory.
    #[serde(default)]
    pub spool_dir: Option<PathBuf>,
}
