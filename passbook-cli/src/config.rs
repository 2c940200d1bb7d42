use anyhow::{Context, Result};
use passbook_core::DEFAULT_FALLBACK_YEAR;
use passbook_ingest::{ParseSettings, ValidationPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::output::OutputFormat;
use crate::state::ensure_passbook_home;

/// Default upper bound on input size (10 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserSection,
    #[serde(default)]
    pub validation: ValidationSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSection {
    /// Year used for `dd/mm` rows when the statement date is unknown
    pub fallback_year: i32,
    /// Inputs above this size are refused
    pub max_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationSection {
    #[serde(default)]
    pub credit_card: ValidationPolicy,
    #[serde(default)]
    pub savings: ValidationPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for ParserSection {
    fn default() -> Self {
        Self {
            fallback_year: DEFAULT_FALLBACK_YEAR,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl Config {
    pub fn parse_settings(&self) -> ParseSettings {
        ParseSettings {
            fallback_year: self.parser.fallback_year,
            credit_card: self.validation.credit_card,
            savings: self.validation.savings,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_passbook_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        log::debug!("no config at {}, using defaults", p.display());
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        assert!(s.contains("fallback_year = 2023"));
        assert!(s.contains("credit_card = \"transactions-only\""));
        assert_eq!(toml::from_str::<Config>(&s).unwrap(), cfg);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: Config = toml::from_str(
            "[validation]\nsavings = \"require-metadata\"\n\n[output]\nformat = \"csv\"\n",
        )
        .unwrap();
        assert_eq!(cfg.parser, ParserSection::default());
        assert_eq!(cfg.validation.credit_card, ValidationPolicy::TransactionsOnly);
        assert_eq!(cfg.validation.savings, ValidationPolicy::RequireMetadata);
        assert_eq!(cfg.output.format, OutputFormat::Csv);
    }

    #[test]
    fn test_parse_settings_from_config() {
        let mut cfg = Config::default();
        cfg.parser.fallback_year = 2021;
        cfg.validation.credit_card = ValidationPolicy::RequireMetadata;

        let settings = cfg.parse_settings();
        assert_eq!(settings.fallback_year, 2021);
        assert_eq!(settings.credit_card, ValidationPolicy::RequireMetadata);
        assert_eq!(settings.savings, ValidationPolicy::TransactionsOnly);
    }
}
