use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tally_finance::market::{DEFAULT_ALPHAVANTAGE_URL, DEFAULT_APILAYER_URL, MarketConfig};

pub const APILAYER_KEY_VAR: &str = "APILAYER_API_KEY";
pub const ALPHAVANTAGE_KEY_VAR: &str = "ALPHAVANTAGE_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub data: DataSection,
    pub user: UserSection,
    pub market: MarketSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataSection {
    /// Bank statement export (.xlsx or .csv)
    pub statement: PathBuf,
    /// Where auto-named report files are written
    pub reports_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserSection {
    pub currencies: Vec<String>,
    pub stocks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarketSection {
    pub apilayer_key: Option<String>,
    pub alphavantage_key: Option<String>,
    pub convert_to: String,
    pub timeout_secs: u64,
    pub apilayer_url: String,
    pub alphavantage_url: String,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            statement: PathBuf::from("data/operations.xlsx"),
            reports_dir: PathBuf::from("."),
        }
    }
}

impl Default for UserSection {
    fn default() -> Self {
        Self {
            currencies: vec!["USD".to_string(), "EUR".to_string()],
            stocks: ["AAPL", "AMZN", "GOOGL", "MSFT", "TSLA"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Default for MarketSection {
    fn default() -> Self {
        Self {
            apilayer_key: None,
            alphavantage_key: None,
            convert_to: "RUB".to_string(),
            timeout_secs: 10,
            apilayer_url: DEFAULT_APILAYER_URL.to_string(),
            alphavantage_url: DEFAULT_ALPHAVANTAGE_URL.to_string(),
        }
    }
}

impl MarketSection {
    /// Gateway configuration; missing keys are caught by the gateway constructor.
    pub fn to_market_config(&self) -> MarketConfig {
        MarketConfig {
            apilayer_key: self.apilayer_key.clone().unwrap_or_default(),
            alphavantage_key: self.alphavantage_key.clone().unwrap_or_default(),
            convert_to: self.convert_to.clone(),
            apilayer_url: self.apilayer_url.trim_end_matches('/').to_string(),
            alphavantage_url: self.alphavantage_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl Config {
    /// API keys from the environment take precedence over the file.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| var(name).filter(|v| !v.trim().is_empty());
        if let Some(key) = non_empty(APILAYER_KEY_VAR) {
            self.market.apilayer_key = Some(key);
        }
        if let Some(key) = non_empty(ALPHAVANTAGE_KEY_VAR) {
            self.market.alphavantage_key = Some(key);
        }
    }
}

/// Read `path` (defaults when absent) and apply environment overrides.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut cfg = read_config_file(path)?;
    cfg.apply_env(|name| std::env::var(name).ok());
    Ok(cfg)
}

fn read_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}
