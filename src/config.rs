use std::time::Duration;

use chrono::NaiveTime;
use chrono_tz::Tz;

use crate::utils::BotError;

const DEFAULT_SYMBOL: &str = "VOO";
const DEFAULT_TIMEZONE: &str = "America/New_York";
const DEFAULT_ALERT_TIME: &str = "05:00";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co";

/// Startup configuration read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub alpha_vantage_api_key: String,
    pub alpha_vantage_base_url: String,
    /// Instrument tracked by `/price` and the daily alert
    pub symbol: String,
    pub timezone: Tz,
    /// Wall-clock time of the daily alert in `timezone`
    pub alert_time: NaiveTime,
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, BotError> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| BotError::Config(format!("{} not set", key)))
        };
        let optional = |key: &str, default: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let discord_token = required("DISCORD_TOKEN")?;
        let alpha_vantage_api_key = required("ALPHA_VANTAGE_API_KEY")?;

        let timezone_name = optional("ALERT_TIMEZONE", DEFAULT_TIMEZONE);
        let timezone = timezone_name
            .parse::<Tz>()
            .map_err(|e| BotError::Config(format!("Invalid ALERT_TIMEZONE '{}': {}", timezone_name, e)))?;

        let alert_time_raw = optional("ALERT_TIME", DEFAULT_ALERT_TIME);
        let alert_time = NaiveTime::parse_from_str(&alert_time_raw, "%H:%M").map_err(|e| {
            BotError::Config(format!("Invalid ALERT_TIME '{}' (expected HH:MM): {}", alert_time_raw, e))
        })?;

        let timeout_raw = optional("FETCH_TIMEOUT_SECS", &DEFAULT_FETCH_TIMEOUT_SECS.to_string());
        let fetch_timeout = timeout_raw
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| BotError::Config(format!("Invalid FETCH_TIMEOUT_SECS '{}'", timeout_raw)))?;

        Ok(Self {
            discord_token,
            alpha_vantage_api_key,
            alpha_vantage_base_url: optional("ALPHA_VANTAGE_BASE_URL", DEFAULT_ALPHA_VANTAGE_BASE_URL),
            symbol: optional("ALERT_SYMBOL", DEFAULT_SYMBOL).to_uppercase(),
            timezone,
            alert_time,
            fetch_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, BotError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const SECRETS: [(&str, &str); 2] = [("DISCORD_TOKEN", "token"), ("ALPHA_VANTAGE_API_KEY", "key")];

    #[test]
    fn test_defaults() {
        let config = config_from(&SECRETS).unwrap();

        assert_eq!(config.symbol, "VOO");
        assert_eq!(config.timezone, chrono_tz::America::New_York);
        assert_eq!(config.alert_time, NaiveTime::from_hms_opt(5, 0, 0).unwrap());
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.alpha_vantage_base_url, "https://www.alphavantage.co");
    }

    #[test]
    fn test_missing_secrets_fail() {
        let err = config_from(&[("DISCORD_TOKEN", "token")]).unwrap_err();
        assert!(err.to_string().contains("ALPHA_VANTAGE_API_KEY"));

        let err = config_from(&[("DISCORD_TOKEN", "  "), ("ALPHA_VANTAGE_API_KEY", "key")]).unwrap_err();
        assert!(err.to_string().contains("DISCORD_TOKEN"));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = SECRETS.to_vec();
        pairs.extend([
            ("ALERT_SYMBOL", "spy"),
            ("ALERT_TIMEZONE", "Europe/London"),
            ("ALERT_TIME", "17:30"),
            ("FETCH_TIMEOUT_SECS", "3"),
            ("ALPHA_VANTAGE_BASE_URL", "http://127.0.0.1:8080"),
        ]);
        let config = config_from(&pairs).unwrap();

        assert_eq!(config.symbol, "SPY");
        assert_eq!(config.timezone, chrono_tz::Europe::London);
        assert_eq!(config.alert_time, NaiveTime::from_hms_opt(17, 30, 0).unwrap());
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert_eq!(config.alpha_vantage_base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_values_fail() {
        for (key, value) in [
            ("ALERT_TIMEZONE", "Mars/Olympus"),
            ("ALERT_TIME", "5 o'clock"),
            ("FETCH_TIMEOUT_SECS", "0"),
        ] {
            let mut pairs = SECRETS.to_vec();
            pairs.push((key, value));
            assert!(
                matches!(config_from(&pairs), Err(BotError::Config(_))),
                "{} = {} should be rejected",
                key,
                value
            );
        }
    }
}
