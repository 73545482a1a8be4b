use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use kharcha_classify::DEFAULT_REVIEW_THRESHOLD;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scan: ScanSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSection {
    /// IANA timezone used to resolve naive timestamps in inbox exports.
    pub timezone: String,
    /// Transactions below this confidence are flagged for manual review.
    pub review_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: ScanSection {
                timezone: "Asia/Kolkata".to_string(),
                review_threshold: DEFAULT_REVIEW_THRESHOLD,
            },
        }
    }
}

pub fn kharcha_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".kharcha"))
}

pub fn ensure_kharcha_home() -> Result<PathBuf> {
    let dir = kharcha_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_kharcha_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

/// Effective review threshold: the CLI override wins over config.
/// Rejects values outside [0, 1].
pub fn resolve_review_threshold(cli: Option<f64>, configured: f64) -> Result<f64> {
    let v = cli.unwrap_or(configured);
    if !(0.0..=1.0).contains(&v) {
        bail!("review threshold must be between 0 and 1, got {}", v);
    }
    Ok(v)
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
    let cfg = Config::default();
    save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_override_wins_and_bounds_are_inclusive() {
        assert_eq!(resolve_review_threshold(Some(0.8), 0.6).unwrap(), 0.8);
        assert_eq!(resolve_review_threshold(None, 0.6).unwrap(), 0.6);
        assert_eq!(resolve_review_threshold(Some(0.0), 0.6).unwrap(), 0.0);
        assert_eq!(resolve_review_threshold(None, 1.0).unwrap(), 1.0);
    }

    #[test]
    fn test_threshold_outside_unit_interval_is_rejected() {
        assert!(resolve_review_threshold(Some(5.0), 0.6).is_err());
        assert!(resolve_review_threshold(Some(-0.1), 0.6).is_err());
        // A bad value in config.toml is caught the same way as a bad flag.
        assert!(resolve_review_threshold(None, 1.5).is_err());
    }
}
