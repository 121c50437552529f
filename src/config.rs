use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub orders_api_url: String,
    pub tier_cache_ttl: Duration,
    pub orders_api_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let orders_api_url = env_map
            .get("ORDERS_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnv("ORDERS_API_URL".to_string()))?;

        if !orders_api_url.starts_with("http://") && !orders_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "ORDERS_API_URL".to_string(),
                format!("must be an http(s) URL, got {}", orders_api_url),
            ));
        }

        let tier_cache_ttl = parse_positive_ms(&env_map, "TIER_CACHE_TTL_MS", "3600000")?;
        let orders_api_timeout = parse_positive_ms(&env_map, "ORDERS_API_TIMEOUT_MS", "30000")?;

        Ok(Config {
            port,
            orders_api_url,
            tier_cache_ttl,
            orders_api_timeout,
        })
    }
}

fn parse_positive_ms(
    env_map: &HashMap<String, String>,
    key: &str,
    default: &str,
) -> Result<Duration, ConfigError> {
    let ms = env_map
        .get(key)
        .map(|s| s.as_str())
        .unwrap_or(default)
        .trim()
        .parse::<u64>()
        .map_err(|_| {
            ConfigError::InvalidValue(key.to_string(), "must be a valid u64".to_string())
        })?;

    if ms == 0 {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }

    Ok(Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert(
            "ORDERS_API_URL".to_string(),
            "https://api.example.test".to_string(),
        );
        map
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.tier_cache_ttl, Duration::from_millis(3_600_000));
        assert_eq!(config.orders_api_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_orders_api_url() {
        let mut env_map = setup_required_env();
        env_map.remove("ORDERS_API_URL");
        match Config::from_env_map(env_map) {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "ORDERS_API_URL"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_non_http_orders_api_url() {
        let mut env_map = setup_required_env();
        env_map.insert("ORDERS_API_URL".to_string(), "ftp://nope".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "ORDERS_API_URL"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = setup_required_env();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_custom_ttl() {
        let mut env_map = setup_required_env();
        env_map.insert("TIER_CACHE_TTL_MS".to_string(), "60000".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.tier_cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut env_map = setup_required_env();
        env_map.insert("TIER_CACHE_TTL_MS".to_string(), "0".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "TIER_CACHE_TTL_MS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_timeout() {
        let mut env_map = setup_required_env();
        env_map.insert("ORDERS_API_TIMEOUT_MS".to_string(), "-5".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "ORDERS_API_TIMEOUT_MS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
