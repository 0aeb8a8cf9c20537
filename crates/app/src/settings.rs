//! Handles settings for the application. Configuration is written in
//! `settings.toml`, with environment overrides under the `WIREPAY`
//! prefix (e.g. `WIREPAY_SERVER__PORT=9000`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
}

/// Backing store selection. `memory` is the in-process backend; the
/// `endpoint` field is read for networked backends configured behind
/// the same adapter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
}

#[derive(Debug, Deserialize)]
pub struct Store {
    pub backend: StoreBackend,
    pub endpoint: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub store: Store,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.port", 8080)?
            .set_default("store.backend", "memory")?
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("WIREPAY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
