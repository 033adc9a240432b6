use anyhow::Result;
use config::{Config, FileFormat};
use serde::Deserialize;
use std::env;

pub const DEFAULT_UPSTREAM_URL: &str = "https://opensky-network.org/api/states/all";
pub const DEFAULT_EXPORT_FILE_NAME: &str = "gulf_jets.xlsx";

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub port: u16,
    pub bind_host: String,
    pub upstream_url: String,
    pub export_file_name: String,
}

impl Settings {
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

/// Layers defaults, `gulfjets.toml`, `GULFJETS_*` variables and finally a plain `PORT`.
pub fn load_settings() -> Result<Settings> {
    Ok(build_config(env::var("PORT").ok())?.try_deserialize()?)
}

fn build_config(port_override: Option<String>) -> Result<Config> {
    Ok(Config::builder()
        .set_default("port", 5000)?
        .set_default("bind_host", "0.0.0.0")?
        .set_default("upstream_url", DEFAULT_UPSTREAM_URL)?
        .set_default("export_file_name", DEFAULT_EXPORT_FILE_NAME)?
        .add_source(config::File::new("gulfjets.toml", FileFormat::Toml).required(false))
        .add_source(config::Environment::with_prefix("GULFJETS"))
        .set_override_option("port", port_override)?
        .build()?)
}
