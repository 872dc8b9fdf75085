//! Configuration loading for geoqa.

use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;

use crate::matcher::{DEFAULT_FUZZY_THRESHOLD, DETAILED_FALLBACK, MatcherOptions, SHORT_FALLBACK};

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "GEOQA_CONFIG";

/// Top-level configuration loaded from config.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
}

/// Location of the Q&A dataset.
#[derive(Debug, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

/// Which fallback message to answer with on a total miss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackStyle {
    /// Apology plus suggested topics.
    #[default]
    Detailed,
    /// Apology only.
    Short,
}

/// Matcher tuning.
#[derive(Debug, Deserialize)]
pub struct MatcherConfig {
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
    #[serde(default)]
    pub fallback: FallbackStyle,
}

fn default_dataset_path() -> String {
    "~/.geoqa/geography_qa.json".to_string()
}

fn default_fuzzy_threshold() -> f64 {
    DEFAULT_FUZZY_THRESHOLD
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: default_fuzzy_threshold(),
            fallback: FallbackStyle::default(),
        }
    }
}

impl Config {
    /// Load config from `$GEOQA_CONFIG` or ~/.config/geoqa/config.toml,
    /// falling back to defaults when neither exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(Self::config_path);

        if let Some(path) = config_path
            && path.exists()
        {
            return Self::from_file(&path);
        }

        Ok(Config::default())
    }

    /// Load config from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))?;

        if !(0.0..=1.0).contains(&config.matcher.fuzzy_threshold) {
            anyhow::bail!(
                "Invalid config {}: fuzzy_threshold must be between 0 and 1, got {}",
                path.display(),
                config.matcher.fuzzy_threshold
            );
        }

        Ok(config)
    }

    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "geoqa").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Dataset path with `~` expanded.
    #[must_use]
    pub fn dataset_path(&self) -> PathBuf {
        expand_tilde(&self.dataset.path)
    }

    #[must_use]
    pub fn matcher_options(&self) -> MatcherOptions {
        let fallback = match self.matcher.fallback {
            FallbackStyle::Detailed => DETAILED_FALLBACK,
            FallbackStyle::Short => SHORT_FALLBACK,
        };

        MatcherOptions {
            fuzzy_threshold: self.matcher.fuzzy_threshold,
            fallback: fallback.to_string(),
        }
    }
}

/// Expand ~ to the user's home directory.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(base_dirs) = BaseDirs::new()
    {
        return base_dirs.home_dir().join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        let options = config.matcher_options();

        assert!(config.dataset.path.ends_with("geography_qa.json"));
        assert!((options.fuzzy_threshold - 0.7).abs() < f64::EPSILON);
        assert_eq!(options.fallback, DETAILED_FALLBACK);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let (_dir, path) = write_config("[dataset]\npath = \"/data/qa.json\"\n");
        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.dataset_path(), PathBuf::from("/data/qa.json"));
        assert_eq!(config.matcher.fallback, FallbackStyle::Detailed);
    }

    #[test]
    fn matcher_section() {
        let (_dir, path) =
            write_config("[matcher]\nfuzzy_threshold = 0.5\nfallback = \"short\"\n");
        let options = Config::from_file(&path).unwrap().matcher_options();

        assert!((options.fuzzy_threshold - 0.5).abs() < f64::EPSILON);
        assert_eq!(options.fallback, SHORT_FALLBACK);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let (_dir, path) = write_config("[matcher]\nfuzzy_threshold = 1.5\n");
        let err = Config::from_file(&path).unwrap_err();

        assert!(err.to_string().contains("fuzzy_threshold"));
    }

    #[test]
    fn unknown_fallback_style_is_rejected() {
        let (_dir, path) = write_config("[matcher]\nfallback = \"verbose\"\n");
        assert!(Config::from_file(&path).is_err());
    }
}
