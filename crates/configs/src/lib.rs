use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// JSON array of vehicles used to seed the store at startup
    #[serde(default = "default_vehicles_path")]
    pub vehicles_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { vehicles_path: default_vehicles_path() }
    }
}

fn default_vehicles_path() -> String { "data/vehicles.json".into() }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

/// Read `path`, or fall back to [`from_env`] when the file does not exist.
/// Any other failure (unreadable file, bad TOML, wrong types) is returned.
pub fn load_or_env(path: &str) -> Result<AppConfig> {
    match load_from_file(path) {
        Ok(cfg) => Ok(cfg),
        Err(e) if is_not_found(&e) => Ok(from_env()),
        Err(e) => Err(e.context(format!("invalid config file {path}"))),
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

/// Build the config purely from environment variables.
pub fn from_env() -> AppConfig {
    let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok());
    let vehicles_path = std::env::var("VEHICLES_PATH").unwrap_or_else(|_| default_vehicles_path());
    AppConfig {
        server: ServerConfig { host, port, worker_threads },
        data: DataConfig { vehicles_path },
    }
}

impl AppConfig {
    /// Load from the TOML file if present, otherwise from env; then validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_or_env(&config_path())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.data.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl DataConfig {
    pub fn validate(&self) -> Result<()> {
        if self.vehicles_path.trim().is_empty() {
            return Err(anyhow!(
                "data.vehicles_path is empty; set it in config.toml or VEHICLES_PATH"
            ));
        }
        Ok(())
    }
}
