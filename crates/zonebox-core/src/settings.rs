use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_PROVIDER: &str = "openai";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Which completion provider to call and with what credential.
///
/// `provider` and `model` may come from `~/.zonebox/settings.json`; the
/// credential only ever comes from the process environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
        }
    }
}

/// Resolve the global settings directory (~/.zonebox/).
pub fn settings_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".zonebox")
}

pub fn settings_path() -> PathBuf {
    settings_dir().join("settings.json")
}

/// Environment variable holding the credential for a provider.
pub fn credential_var(provider: &str) -> String {
    match provider {
        "openai" => "OPENAI_API_KEY".to_string(),
        "anthropic" => "ANTHROPIC_API_KEY".to_string(),
        "google" => "GOOGLE_API_KEY".to_string(),
        "groq" => "GROQ_API_KEY".to_string(),
        "mistral" => "MISTRAL_API_KEY".to_string(),
        "deepseek" => "DEEPSEEK_API_KEY".to_string(),
        other => format!("{}_API_KEY", other.to_uppercase()),
    }
}

impl ProviderSettings {
    /// Settings file (if any) overlaid with the process environment.
    pub fn load() -> Result<Self, SettingsError> {
        Ok(Self::read_file(&settings_path())?.with_env(|name| std::env::var(name).ok()))
    }

    /// Read a settings file. A missing file yields the defaults.
    pub fn read_file(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `ZONEBOX_PROVIDER`, `ZONEBOX_MODEL` and the provider's
    /// credential variable. Blank values count as unset.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(provider) = get("ZONEBOX_PROVIDER") {
            self.provider = provider;
        }
        if let Some(model) = get("ZONEBOX_MODEL") {
            self.model = model;
        }
        self.api_key = get(&credential_var(&self.provider));
        self
    }

    pub fn credential_var(&self) -> String {
        credential_var(&self.provider)
    }

    /// Local backends answer without a credential.
    pub fn needs_credential(&self) -> bool {
        self.provider != "ollama"
    }

    /// First missing piece of configuration, named the way the error
    /// message reports it.
    pub fn missing(&self) -> Option<String> {
        if self.provider.is_empty() {
            return Some("provider".to_string());
        }
        if self.model.is_empty() {
            return Some("model".to_string());
        }
        if self.needs_credential() && self.api_key.is_none() {
            return Some(self.credential_var());
        }
        None
    }

    pub fn is_configured(&self) -> bool {
        self.missing().is_none()
    }
}
