use crate::utils::error::AppError;
use std::env;

/// Extra origin allowed when running locally (Vite dev server).
pub const LOCAL_DEV_ORIGIN: &str = "http://localhost:5173";

pub const DEFAULT_COUNTRIES_API_URL: &str = "https://api.first.org/data/v1/countries";

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    pub max_requests: u32,
    pub window_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub environment: String,
    pub allowed_origins: Vec<String>,
    pub cloudinary: Option<CloudinaryConfig>,
    pub countries_api_url: String,
    pub rate_limit: RateLimitSettings,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenv().ok()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Config("DATABASE_URL must be set".into()))?;

        let environment = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
        let mut allowed_origins = parse_origins(lookup("ALLOWED_ORIGINS").as_deref().unwrap_or(""));
        if is_local_env(&environment) && !allowed_origins.iter().any(|o| o == LOCAL_DEV_ORIGIN) {
            allowed_origins.push(LOCAL_DEV_ORIGIN.to_string());
        }

        let cloudinary = match (
            lookup("CLOUDINARY_CLOUD_NAME"),
            lookup("CLOUDINARY_API_KEY"),
            lookup("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryConfig {
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => None,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", lookup("PORT"), 5000)?,
            database_url,
            environment,
            allowed_origins,
            cloudinary,
            countries_api_url: lookup("COUNTRIES_API_URL")
                .unwrap_or_else(|| DEFAULT_COUNTRIES_API_URL.to_string()),
            rate_limit: RateLimitSettings {
                max_requests: parse_or("RATE_LIMIT_MAX", lookup("RATE_LIMIT_MAX"), 100)?,
                window_secs: parse_or("RATE_LIMIT_WINDOW_SECS", lookup("RATE_LIMIT_WINDOW_SECS"), 900)?,
            },
        })
    }

    pub fn is_local(&self) -> bool {
        is_local_env(&self.environment)
    }
}

fn is_local_env(environment: &str) -> bool {
    let environment = environment.trim();
    environment.is_empty() || environment == "development"
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_or<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, AppError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn requires_database_url() {
        assert!(matches!(config_from(&[]), Err(AppError::Config(_))));
    }

    #[test]
    fn defaults() {
        let config = config_from(&[("DATABASE_URL", "mongodb://localhost:27017/staff")]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.is_local());
        assert_eq!(config.allowed_origins, vec![LOCAL_DEV_ORIGIN.to_string()]);
        assert!(config.cloudinary.is_none());
        assert_eq!(config.countries_api_url, DEFAULT_COUNTRIES_API_URL);
        assert_eq!(config.rate_limit.max_requests, 100);
        assert_eq!(config.rate_limit.window_secs, 900);
    }

    #[test]
    fn production_origins_are_not_extended() {
        let config = config_from(&[
            ("DATABASE_URL", "mongodb://db/staff"),
            ("APP_ENV", "production"),
            ("ALLOWED_ORIGINS", "https://a.example.com, https://b.example.com,,"),
        ])
        .unwrap();
        assert!(!config.is_local());
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example.com", "https://b.example.com"]
        );
    }

    #[test]
    fn cloudinary_needs_all_three_values() {
        let partial = config_from(&[
            ("DATABASE_URL", "mongodb://db/staff"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
        ])
        .unwrap();
        assert!(partial.cloudinary.is_none());

        let full = config_from(&[
            ("DATABASE_URL", "mongodb://db/staff"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
            ("CLOUDINARY_API_KEY", "key"),
            ("CLOUDINARY_API_SECRET", "secret"),
        ])
        .unwrap();
        assert_eq!(full.cloudinary.unwrap().cloud_name, "demo");
    }

    #[test]
    fn invalid_port_is_an_error() {
        let result = config_from(&[("DATABASE_URL", "mongodb://db/staff"), ("PORT", "http")]);
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
