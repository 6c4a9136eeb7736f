use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Базовый адрес удалённого API, без хвостового слэша
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[upstream]
base_url = "http://127.0.0.1:8080"
timeout_secs = 15
"#;

/// Загрузка конфигурации из config.toml.
///
/// Порядок поиска:
/// 1. Рядом с исполняемым файлом (production)
/// 2. Встроенный конфиг по умолчанию
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.upstream.timeout_secs, 15);
    }

    #[test]
    fn test_config_without_upstream_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[server]\nport = 3000\n");
        assert!(result.is_err());
    }
}
