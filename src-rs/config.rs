use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::cons::provider_cons::LLMProvider;

const CONFIG_DIR: &str = ".multillm";
const CONFIG_FILE: &str = "config.json";

fn default_request_timeout_secs() -> u64 {
    120
}

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Stable panel id (e.g., "phi", "gemini")
    pub id: String,

    /// Panel heading; falls back to the id
    #[serde(default)]
    pub title: String,

    /// Wire family, see `LLMProvider::from_name`
    #[serde(alias = "provider_brand")]
    pub kind: String,

    /// Base URL for the LLM API
    pub base_url: String,

    /// Model identifier sent to the provider
    #[serde(alias = "model_name")]
    pub model: String,

    /// Environment variable the API key is read from
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Inline API key, wins over `api_key_env`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub temperature: Option<f32>,

    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl ProviderConfig {
    pub fn provider_kind(&self) -> Result<LLMProvider> {
        LLMProvider::from_name(&self.kind)
            .ok_or_else(|| anyhow::anyhow!("Unknown provider kind '{}' for {}", self.kind, self.id))
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }

    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let inline = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty());
        if let Some(key) = inline {
            return Some(key.to_string());
        }
        let env_name = self.api_key_env.as_deref()?.trim();
        if env_name.is_empty() {
            return None;
        }
        lookup(env_name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// User override configuration (restricted fields)
#[derive(Deserialize)]
pub struct UserOverrideConfig {
    pub providers: Option<Vec<ProviderConfig>>,
    #[serde(alias = "requestTimeoutSecs")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Per-request timeout applied to every provider call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Registry of providers, one panel each
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl AppConfig {
    /// Load configuration with layered strategy:
    /// 1. Defaults (Embedded Config.toml)
    /// 2. User Config (~/.multillm/config.json)
    /// 3. Project Config (./.multillm/config.json)
    pub fn load() -> Result<Self> {
        let mut config = Self::embedded()?;

        if let Some(home) = dirs::home_dir() {
            let user_path = home.join(CONFIG_DIR).join(CONFIG_FILE);
            Self::apply_patch(&mut config, user_path);
        }

        let project_path = Path::new(CONFIG_DIR).join(CONFIG_FILE);
        Self::apply_patch(&mut config, project_path);

        config.validate()?;
        Ok(config)
    }

    pub fn embedded() -> Result<Self> {
        let default_str = include_str!("../Config.toml");
        Self::from_toml_str(default_str).context("Failed to parse embedded Config.toml")
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.providers.is_empty() {
            anyhow::bail!("No providers configured");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than zero");
        }
        let mut seen = HashSet::new();
        for p in &self.providers {
            if p.id.trim().is_empty() {
                anyhow::bail!("Provider with empty id");
            }
            if !seen.insert(p.id.as_str()) {
                anyhow::bail!("Duplicate provider id: {}", p.id);
            }
            if p.model.trim().is_empty() {
                anyhow::bail!("Provider {} has no model", p.id);
            }
            p.provider_kind()?;
        }
        Ok(())
    }

    pub(crate) fn apply_patch<P: AsRef<Path>>(config: &mut AppConfig, path: P) {
        let path = path.as_ref();
        if !path.exists() {
            return;
        }
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Failed to read config patch at {}: {}", path.display(), e);
                return;
            }
        };
        match serde_json::from_str::<UserOverrideConfig>(&content) {
            Ok(patch) => Self::merge_patch(config, patch),
            Err(e) => {
                log::warn!("Failed to parse config patch at {}: {}", path.display(), e);
            }
        }
    }

    pub(crate) fn merge_patch(config: &mut AppConfig, patch: UserOverrideConfig) {
        if let Some(providers) = patch.providers {
            // Later entries with the same id replace earlier ones in place
            let mut ordered_keys: Vec<String> = Vec::new();
            let mut by_key: HashMap<String, ProviderConfig> = HashMap::new();

            for p in providers {
                if p.id.trim().is_empty() || p.model.trim().is_empty() {
                    continue;
                }
                let key = p.id.clone();
                if !by_key.contains_key(&key) {
                    ordered_keys.push(key.clone());
                }
                by_key.insert(key, p);
            }

            let merged: Vec<ProviderConfig> = ordered_keys
                .into_iter()
                .filter_map(|k| by_key.remove(&k))
                .collect();
            if !merged.is_empty() {
                config.providers = merged;
            }
        }
        if let Some(secs) = patch.request_timeout_secs.filter(|s| *s > 0) {
            config.request_timeout_secs = secs;
        }
    }

    pub fn to_public(&self) -> PublicAppConfig {
        PublicAppConfig {
            request_timeout_secs: self.request_timeout_secs,
            providers: self
                .providers
                .iter()
                .map(|p| PublicProviderConfig {
                    id: p.id.clone(),
                    title: p.display_title().to_string(),
                    kind: p.kind.clone(),
                    base_url: p.base_url.clone(),
                    model: p.model.clone(),
                    has_api_key: p.resolve_api_key().is_some(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicAppConfig {
    pub request_timeout_secs: u64,
    pub providers: Vec<PublicProviderConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicProviderConfig {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub base_url: String,
    pub model: String,
    pub has_api_key: bool,
}
