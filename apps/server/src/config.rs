use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use hivebook_core::constants::DEFAULT_DASHBOARD_CACHE_TTL_SECS;
use hivebook_core::dashboard::AggregationMode;
use hivebook_core::invoices::InvoiceIncomePolicy;

use crate::auth::{decode_secret_key, AuthConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("Unknown log format '{other}' (expected text or json)"),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    /// `None` runs the server in single-user mode without tokens.
    pub auth: Option<AuthConfig>,
    pub dashboard_cache_ttl: Duration,
    pub aggregation_mode: AggregationMode,
    pub invoice_income_policy: InvoiceIncomePolicy,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, `HB_*` names as in the environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let listen_addr: SocketAddr = var("HB_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid HB_LISTEN_ADDR")?;
        let db_path = var("HB_DB_PATH", "./db/hivebook.db");
        let cors_allow = var("HB_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var("HB_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);
        let static_dir = var("HB_STATIC_DIR", "dist");

        let auth = match lookup("HB_AUTH_SECRET") {
            Some(raw) if !raw.trim().is_empty() => Some(AuthConfig {
                jwt_secret: decode_secret_key(&raw).context("Invalid HB_AUTH_SECRET")?,
            }),
            _ => None,
        };

        let cache_ttl_secs: u64 = var(
            "HB_DASHBOARD_CACHE_TTL_SECS",
            &DEFAULT_DASHBOARD_CACHE_TTL_SECS.to_string(),
        )
        .parse()
        .context("Invalid HB_DASHBOARD_CACHE_TTL_SECS")?;
        let aggregation_mode: AggregationMode = var("HB_AGGREGATION_MODE", "lenient")
            .parse()
            .context("Invalid HB_AGGREGATION_MODE")?;
        let invoice_income_policy: InvoiceIncomePolicy = var("HB_INVOICE_INCOME_POLICY", "compensate")
            .parse()
            .context("Invalid HB_INVOICE_INCOME_POLICY")?;
        let log_format: LogFormat = var("HB_LOG_FORMAT", "text").parse()?;

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir,
            auth,
            dashboard_cache_ttl: Duration::from_secs(cache_ttl_secs),
            aggregation_mode,
            invoice_income_policy,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.cors_allow, vec!["*".to_string()]);
        assert!(config.auth.is_none());
        assert_eq!(config.dashboard_cache_ttl, Duration::from_secs(60));
        assert_eq!(config.aggregation_mode, AggregationMode::Lenient);
        assert_eq!(config.invoice_income_policy, InvoiceIncomePolicy::Compensate);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HB_CORS_ALLOW_ORIGINS", "http://a.test, http://b.test,"),
            ("HB_AGGREGATION_MODE", "STRICT"),
            ("HB_INVOICE_INCOME_POLICY", "reconcile"),
            ("HB_DASHBOARD_CACHE_TTL_SECS", "5"),
            ("HB_LOG_FORMAT", "json"),
            ("HB_AUTH_SECRET", "0123456789abcdef0123456789abcdef"),
        ])
        .unwrap();
        assert_eq!(config.cors_allow.len(), 2);
        assert_eq!(config.aggregation_mode, AggregationMode::Strict);
        assert_eq!(config.invoice_income_policy, InvoiceIncomePolicy::Reconcile);
        assert_eq!(config.dashboard_cache_ttl, Duration::from_secs(5));
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.auth.is_some());
    }

    #[test]
    fn test_invalid_values_fail_startup() {
        assert!(config_from(&[("HB_AGGREGATION_MODE", "sloppy")]).is_err());
        assert!(config_from(&[("HB_LISTEN_ADDR", "nowhere")]).is_err());
        assert!(config_from(&[("HB_AUTH_SECRET", "short")]).is_err());
    }
}
