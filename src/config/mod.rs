//! Configuration management

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[cfg(test)]
mod tests;

/// Main configuration structure, loaded from `.ifacegen.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Files or directories to scan for Go sources
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Output file; stdout when absent
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Generation settings
    #[serde(default)]
    pub generate: GenerateConfig,
}

/// Settings controlling the generated interfaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Comment emitted at the top of the generated file
    #[serde(default = "default_comment")]
    pub comment: String,

    /// Suffix appended to each type name to form the interface name
    #[serde(default = "default_suffix")]
    pub interface_suffix: String,

    /// Comment prefixed onto every generated interface's documentation
    #[serde(default)]
    pub interface_comment: String,

    /// Copy the original type declaration docs into the interface docs
    #[serde(default)]
    pub copy_docs: bool,
}

fn default_comment() -> String {
    "Code generated by ifacegen. DO NOT EDIT.".to_string()
}

fn default_suffix() -> String {
    "Interface".to_string()
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            comment: default_comment(),
            interface_suffix: default_suffix(),
            interface_comment: String::new(),
            copy_docs: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            sources: Vec::new(),
            output: None,
            generate: GenerateConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != "1.0" {
            return Err(anyhow!(
                "Unsupported configuration version: {}",
                self.version
            ));
        }

        if self.generate.interface_suffix.is_empty() {
            return Err(anyhow!("interface_suffix must not be empty"));
        }

        Ok(())
    }
}
