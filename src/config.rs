use std::env;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,

    pub weather_api: WeatherApiConfig,

    pub daily_weather_enabled: bool,
    pub daily_weather_cron: String,
}

/// Settings for the OpenWeatherMap client, handed to the fetcher at construction.
#[derive(Debug, Clone)]
pub struct WeatherApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub location: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, so tests don't have to
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            db_max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 20)?,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&get, "PORT", 8080)?,
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "http://localhost:3000".into())
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),

            weather_api: WeatherApiConfig {
                api_key: get("OPENWEATHER_API_KEY")
                    .ok_or(ConfigError::Missing("OPENWEATHER_API_KEY"))?,
                base_url: get("OPENWEATHER_BASE_URL")
                    .unwrap_or_else(|| "https://api.openweathermap.org/data/2.5".into())
                    .trim_end_matches('/')
                    .to_string(),
                location: get("WEATHER_LOCATION").unwrap_or_else(|| "seoul".into()),
                timeout_secs: parse_or(&get, "WEATHER_HTTP_TIMEOUT_SECS", 10)?,
            },

            daily_weather_enabled: parse_or(&get, "DAILY_WEATHER_ENABLED", true)?,
            // 01:00 every day (sec min hour dom month dow)
            daily_weather_cron: get("DAILY_WEATHER_CRON").unwrap_or_else(|| "0 0 1 * * *".into()),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}
