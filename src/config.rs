use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "keygate.yaml";

/// Gateway configuration, read from an optional YAML file with
/// environment-variable overrides on top.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub store: StoreConfig,
    pub gate: GateConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Redis,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Reject requests whose target path is empty once the leading
    /// separator and query string are stripped.
    pub require_endpoint: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            store: StoreConfig::default(),
            gate: GateConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Redis,
            url: "redis://127.0.0.1:6379".to_string(),
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            require_endpoint: true,
        }
    }
}

impl Config {
    /// Loads configuration.
    ///
    /// A file named by `KEYGATE_CONFIG` must exist and parse; the default
    /// `keygate.yaml` is only read when present. `LISTEN`, `STORE_URL`,
    /// `STORE_BACKEND` and `REQUIRE_ENDPOINT` override file values.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("KEYGATE_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.listen_addr = listen_addr;
        }

        if let Ok(url) = std::env::var("STORE_URL") {
            cfg.store.url = url;
        }

        if let Ok(backend) = std::env::var("STORE_BACKEND") {
            cfg.store.backend = match backend.as_str() {
                "redis" => StoreBackend::Redis,
                "memory" => StoreBackend::Memory,
                other => anyhow::bail!(
                    "unknown STORE_BACKEND {other:?}, expected \"redis\" or \"memory\""
                ),
            };
        }

        if let Ok(flag) = std::env::var("REQUIRE_ENDPOINT") {
            cfg.gate.require_endpoint = !matches!(flag.as_str(), "0" | "false" | "no");
        }

        Ok(cfg)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        serde_yaml::from_str(&raw).with_context(|| format!("invalid config file {path}"))
    }
}
