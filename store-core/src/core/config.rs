/// Store configuration
///
/// # Environment variables
///
/// All values can be overridden through environment variables:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | BRASA_STORE_NAME | Brasa Burgers | Store name shown in order summaries |
/// | BRASA_STORE_PHONE | (empty) | Hand-off destination for order summaries |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_LEVEL | info | tracing level filter |
/// | LOG_DIR | (none) | daily rolling log file directory |
///
/// The delivery fee is deliberately not configuration: it is a fixed
/// pricing constant (see `pricing::DELIVERY_FEE`).
#[derive(Debug, Clone)]
pub struct Config {
    /// Store name, used when rendering order summaries
    pub store_name: String,
    /// Destination of the notification hand-off (chat channel number)
    pub store_phone: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// tracing level filter
    pub log_level: String,
    /// Optional directory for daily rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            store_name: std::env::var("BRASA_STORE_NAME")
                .unwrap_or_else(|_| "Brasa Burgers".into()),
            store_phone: std::env::var("BRASA_STORE_PHONE").unwrap_or_default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Override the store identity, keeping everything else from the
    /// environment. Used in tests.
    pub fn with_overrides(store_name: impl Into<String>, store_phone: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.store_name = store_name.into();
        config.store_phone = store_phone.into();
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
