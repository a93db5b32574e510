use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spendwise_domain::{CategoryCatalog, DEFAULT_DISPLAY_PRECISION, DEFAULT_STARTING_BALANCE};

const APP_DIR: &str = "spendwise";

/// Stores user-configurable wallet preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Balance a brand-new wallet starts with.
    #[serde(default = "Config::default_starting_balance")]
    pub starting_balance: Decimal,
    #[serde(default = "CategoryCatalog::default_names")]
    pub categories: Vec<String>,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_currency_precision")]
    pub currency_precision: u32,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_profile_value")]
    pub default_profile: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for wallet files.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_balance: Self::default_starting_balance(),
            categories: CategoryCatalog::default_names(),
            currency_symbol: Self::default_currency_symbol(),
            currency_precision: Self::default_currency_precision(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            default_profile: Self::default_profile_value(),
            data_root: None,
        }
    }
}

impl Config {
    pub fn default_starting_balance() -> Decimal {
        DEFAULT_STARTING_BALANCE
    }

    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    pub fn default_currency_precision() -> u32 {
        DEFAULT_DISPLAY_PRECISION
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_profile_value() -> String {
        "default".into()
    }

    /// Category set used to validate expense drafts.
    pub fn catalog(&self) -> CategoryCatalog {
        let catalog = CategoryCatalog::new(self.categories.iter().cloned());
        if catalog.is_empty() {
            CategoryCatalog::default()
        } else {
            catalog
        }
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join(APP_DIR)
    }

    /// Formats `amount` with the configured symbol and precision.
    pub fn format_amount(&self, amount: Decimal) -> String {
        let rounded = spendwise_domain::round_for_display(amount, self.currency_precision);
        format!(
            "{symbol}{amount:.prec$}",
            symbol = self.currency_symbol,
            amount = rounded,
            prec = self.currency_precision as usize
        )
    }
}
