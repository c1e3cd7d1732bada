use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/pget/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PgetConfig {
    /// Seconds between progress reports on stderr.
    pub progress_interval_secs: u64,
    /// Digest algorithm used when a checksum is supplied (e.g. "sha-256").
    pub digest_algorithm: String,
    /// Default worker pool size; None means one worker per segment.
    #[serde(default)]
    pub default_workers: Option<usize>,
    /// Default segment count; None means one segment per URL.
    #[serde(default)]
    pub default_segments: Option<usize>,
}

impl Default for PgetConfig {
    fn default() -> Self {
        Self {
            progress_interval_secs: 1,
            digest_algorithm: "sha-256".to_string(),
            default_workers: None,
            default_segments: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pget")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PgetConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PgetConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PgetConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = PgetConfig::default();
        assert_eq!(cfg.progress_interval_secs, 1);
        assert_eq!(cfg.digest_algorithm, "sha-256");
        assert!(cfg.default_workers.is_none());
        assert!(cfg.default_segments.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = PgetConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PgetConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.progress_interval_secs, cfg.progress_interval_secs);
        assert_eq!(parsed.digest_algorithm, cfg.digest_algorithm);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            progress_interval_secs = 5
            digest_algorithm = "sha-512"
            default_workers = 8
        "#;
        let cfg: PgetConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.progress_interval_secs, 5);
        assert_eq!(cfg.digest_algorithm, "sha-512");
        assert_eq!(cfg.default_workers, Some(8));
        assert!(cfg.default_segments.is_none());
    }
}
