//! Storefront configuration, read from the command line and the environment.

use crate::model::payment;
use crate::services::ProxyConfig;
use crate::session::SessionSettings;
use clap::{Args, Parser};
use std::time::Duration;

/// Value shipped in templates before a real proxy URL is filled in.
pub const PROXY_URL_PLACEHOLDER: &str = "PASTE_YOUR_GOOGLE_APPS_SCRIPT_URL_HERE";

/// Storefront configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "storefront", about = "Food-ordering storefront demo", long_about = None)]
pub struct StorefrontConfig {
    /// Generation proxy settings.
    #[command(flatten)]
    pub proxy: ProxySettings,

    /// Session behaviour.
    #[command(flatten)]
    pub session: SessionOptions,

    /// Demo customer used by the scripted session.
    #[command(flatten)]
    pub demo: DemoCustomer,
}

#[derive(Debug, Clone, Args)]
pub struct ProxySettings {
    /// URL of the generation proxy. Leave unset to use the offline catalog.
    #[arg(long = "proxy-url", env = "STOREFRONT_PROXY_URL")]
    pub url: Option<String>,

    /// Model name forwarded to the proxy
    #[arg(long, env = "STOREFRONT_MODEL", default_value = "gemini-2.5-flash")]
    pub model: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "STOREFRONT_REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub request_timeout_secs: u64,
}

impl ProxySettings {
    /// The proxy connection, or `None` when the URL is missing, blank or
    /// still the placeholder.
    pub fn proxy_config(&self) -> Option<ProxyConfig> {
        let url = self.url.as_deref().map(str::trim)?;
        if url.is_empty() || url == PROXY_URL_PLACEHOLDER {
            return None;
        }
        Some(ProxyConfig {
            url: url.to_string(),
            model: self.model.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.proxy_config().is_some()
    }
}

#[derive(Debug, Clone, Args)]
pub struct SessionOptions {
    /// Shipping fee added to every order (TWD)
    #[arg(long, env = "STOREFRONT_SHIPPING_FEE", default_value = "60")]
    pub shipping_fee: u64,

    /// Seconds an alert stays visible
    #[arg(long, env = "STOREFRONT_ALERT_TTL_SECS", default_value = "3")]
    pub alert_ttl_secs: u64,

    /// Simulated latency of the order record sink, in milliseconds
    #[arg(long, env = "STOREFRONT_RECORD_DELAY_MS", default_value = "500")]
    pub record_delay_ms: u64,
}

impl SessionOptions {
    pub fn settings(&self) -> SessionSettings {
        SessionSettings {
            shipping_fee: self.shipping_fee,
            alert_ttl: Duration::from_secs(self.alert_ttl_secs),
        }
    }

    pub fn record_delay(&self) -> Duration {
        Duration::from_millis(self.record_delay_ms)
    }
}

#[derive(Debug, Clone, Args)]
pub struct DemoCustomer {
    #[arg(long, default_value = "王小明")]
    pub customer_name: String,

    #[arg(long, default_value = "0912345678")]
    pub customer_phone: String,

    #[arg(long, default_value = "台北市信義區松高路 1 號")]
    pub delivery_address: String,

    #[arg(long, default_value = payment::CASH_ON_DELIVERY)]
    pub payment_method: String,

    #[arg(long)]
    pub order_notes: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
