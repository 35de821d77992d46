//! API configuration

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use core_kernel::Rate;
use domain_orders::ExportRates;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Directory rendered documents are written to
    pub output_dir: String,
    /// Log level
    pub log_level: String,
    /// IGST rate applied to new orders (0 under bond/LUT)
    pub igst_rate: Decimal,
    /// Duty Drawback rate applied to new orders
    pub drawback_rate: Decimal,
    /// RODTEP rate applied to new orders
    pub rodtep_rate: Decimal,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "sqlite://exportdocs.db".to_string(),
            output_dir: "generated_documents".to_string(),
            log_level: "info".to_string(),
            igst_rate: dec!(0.00),
            drawback_rate: dec!(0.012),
            rodtep_rate: dec!(0.007),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `EXPORTDOCS_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("EXPORTDOCS"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The incentive rates applied when order totals are calculated
    pub fn export_rates(&self) -> ExportRates {
        ExportRates {
            igst: Rate::new(self.igst_rate),
            drawback: Rate::new(self.drawback_rate),
            rodtep: Rate::new(self.rodtep_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates_match_current_notifications() {
        let rates = ApiConfig::default().export_rates();
        assert_eq!(rates.igst.as_decimal(), dec!(0.00));
        assert_eq!(rates.drawback.as_decimal(), dec!(0.012));
        assert_eq!(rates.rodtep.as_decimal(), dec!(0.007));
    }
}
