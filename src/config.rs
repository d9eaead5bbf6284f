use bigdecimal::BigDecimal;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// External booking page for the paid follow-up test.
    pub booking_url: String,
    /// Price of the follow-up test in USD.
    pub booking_price: BigDecimal,
    /// How long an unattended session keeps its result.
    pub session_ttl_secs: u64,
    pub session_max_capacity: u64,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            booking_url: "https://calendly.com".to_string(),
            booking_price: BigDecimal::from(97),
            session_ttl_secs: 3600,
            session_max_capacity: 10_000,
            rate_limit_per_second: 10,
            rate_limit_burst: 20,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            booking_url: match std::env::var("BOOKING_URL") {
                Ok(url) if !url.trim().is_empty() => http_url("BOOKING_URL", &url)?,
                _ => defaults.booking_url.clone(),
            },
            booking_price: match std::env::var("BOOKING_PRICE") {
                Ok(raw) => {
                    let price = BigDecimal::from_str(raw.trim())
                        .map_err(|_| anyhow::anyhow!("BOOKING_PRICE must be a decimal number"))?;
                    if price <= BigDecimal::from(0) {
                        anyhow::bail!("BOOKING_PRICE must be positive");
                    }
                    price
                }
                Err(_) => defaults.booking_price.clone(),
            },
            session_ttl_secs: positive_var("SESSION_TTL_SECS", defaults.session_ttl_secs)?,
            session_max_capacity: positive_var(
                "SESSION_MAX_CAPACITY",
                defaults.session_max_capacity,
            )?,
            rate_limit_per_second: positive_var(
                "RATE_LIMIT_PER_SECOND",
                defaults.rate_limit_per_second,
            )?,
            rate_limit_burst: positive_var("RATE_LIMIT_BURST", u64::from(defaults.rate_limit_burst))?
                .try_into()
                .map_err(|_| anyhow::anyhow!("RATE_LIMIT_BURST is too large"))?,
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Booking URL: {}", config.booking_url);
        tracing::debug!(
            "Session TTL: {}s, capacity: {}",
            config.session_ttl_secs,
            config.session_max_capacity
        );
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// Checks that `raw` parses as an absolute http(s) URL.
fn http_url(name: &str, raw: &str) -> anyhow::Result<String> {
    let parsed = url::Url::parse(raw.trim())
        .map_err(|e| anyhow::anyhow!("{} is not a valid URL: {}", name, e))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        anyhow::bail!("{} must start with http:// or https://", name);
    }
    Ok(raw.trim().to_string())
}

/// Reads a positive integer variable, falling back to `default` when unset.
fn positive_var(name: &str, default: u64) -> anyhow::Result<u64> {
    let Ok(raw) = std::env::var(name) else {
        return Ok(default);
    };
    let value: u64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{} must be a positive integer", name))?;
    if value == 0 {
        anyhow::bail!("{} must be greater than zero", name);
    }
    Ok(value)
}
