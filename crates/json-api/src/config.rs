//! Server configuration module

use clap::Parser;
use souk_app::gateway::{PaystackConfig, paystack};

/// Souk JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "souk-json", about = "Souk JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8791")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Paystack secret key
    #[arg(long, env = "PAYSTACK_SECRET_KEY", hide_env_values = true)]
    pub paystack_secret_key: String,

    /// Paystack API base URL
    #[arg(long, env = "PAYSTACK_BASE_URL", default_value = paystack::DEFAULT_BASE_URL)]
    pub paystack_base_url: String,
}

impl ServerConfig {
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

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Gateway client settings carried by this configuration.
    #[must_use]
    pub fn paystack(&self) -> PaystackConfig {
        PaystackConfig {
            secret_key: self.paystack_secret_key.clone(),
            base_url: self.paystack_base_url.clone(),
        }
    }
}
