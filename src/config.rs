use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LeadError, Result};
use crate::pipeline::DedupKey;

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "lead_cleaner.toml";
/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "LEAD_CLEANER_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// One of `company`, `owner-email`, `owner-phone`, `company-owner-email`, `none`
    pub dedup_key: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            dedup_key: DedupKey::Company.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub directory: String,
    pub file_name: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: "output".to_string(),
            file_name: "cleaned_leads.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub directory: String,
    pub file_name: String,
    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            file_name: "lead_cleaner.log".to_string(),
            default_filter: "lead_cleaner=info".to_string(),
        }
    }
}

impl Config {
    /// Load from `$LEAD_CLEANER_CONFIG`, falling back to `lead_cleaner.toml`.
    ///
    /// A missing default file yields the built-in defaults; a missing file named
    /// explicitly through the environment is an error.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load_from(path.trim()),
            _ => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load_from(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LeadError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        // Surface a bad dedup key at load time rather than mid-run
        config.dedup_key()?;
        Ok(config)
    }

    pub fn dedup_key(&self) -> Result<Option<DedupKey>> {
        DedupKey::parse_selection(&self.pipeline.dedup_key)
    }

    /// Where `process` writes the cleaned batch when no `--output` is given
    pub fn output_path(&self) -> PathBuf {
        Path::new(&self.output.directory).join(&self.output.file_name)
    }
}
