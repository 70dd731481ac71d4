//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings of the wardrobe HTTP service.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Directory served under `/static` when present.
    #[serde(default)]
    pub static_dir: Option<String>,
}
