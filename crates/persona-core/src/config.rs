//! Configuration for the content source and the inference service

use crate::AnalysisError;
use persona_store::Paths;
use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_AGENT: &str = "PersonaAnalyzer/1.0";
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_FALLBACK_MODEL: &str = "mixtral-8x7b-32768";

const REDDIT_CLIENT_ID: &str = "REDDIT_CLIENT_ID";
const REDDIT_CLIENT_SECRET: &str = "REDDIT_CLIENT_SECRET";
const REDDIT_USER_AGENT: &str = "REDDIT_USER_AGENT";
const GROQ_API_KEY: &str = "GROQ_API_KEY";
const GROQ_API_URL: &str = "GROQ_API_URL";
const GROQ_MODEL: &str = "GROQ_MODEL";
const GROQ_FALLBACK_MODEL: &str = "GROQ_FALLBACK_MODEL";

/// Optional on-disk configuration; every field may be overridden by the environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub reddit_user_agent: Option<String>,
    pub groq_api_key: Option<String>,
    pub groq_api_url: Option<String>,
    pub groq_model: Option<String>,
    pub groq_fallback_model: Option<String>,
}

impl ConfigFile {
    /// Read `config.json` from the application directory, if present
    pub fn load(paths: &Paths) -> anyhow::Result<Self> {
        Ok(persona_store::read_json(&paths.config_file())?.unwrap_or_default())
    }

    fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            REDDIT_CLIENT_ID => &self.reddit_client_id,
            REDDIT_CLIENT_SECRET => &self.reddit_client_secret,
            REDDIT_USER_AGENT => &self.reddit_user_agent,
            GROQ_API_KEY => &self.groq_api_key,
            GROQ_API_URL => &self.groq_api_url,
            GROQ_MODEL => &self.groq_model,
            GROQ_FALLBACK_MODEL => &self.groq_fallback_model,
            _ => &None,
        };
        value.as_deref()
    }
}

/// Application-only credentials for the Reddit API
#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

/// Chat-completion service settings
#[derive(Debug, Clone)]
pub struct InferenceSettings {
    pub api_key: String,

    /// Full chat-completions endpoint URL
    pub api_url: String,

    /// Primary model
    pub model: String,

    /// Substituted once when the primary model is rejected
    pub fallback_model: Option<String>,

    pub max_tokens: u32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Resolved configuration for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub reddit: RedditCredentials,
    pub inference: InferenceSettings,
}

impl Config {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> anyhow::Result<Self> {
        let file = match Paths::new() {
            Ok(paths) => ConfigFile::load(&paths)?,
            Err(_) => ConfigFile::default(),
        };
        Ok(Self::from_lookup(&file, |key| std::env::var(key).ok())?)
    }

    /// Resolve settings from a config file and a key lookup (environment first)
    pub fn from_lookup<F>(file: &ConfigFile, lookup: F) -> Result<Self, AnalysisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolve = |key: &str| -> Option<String> {
            lookup(key)
                .or_else(|| file.get(key).map(str::to_string))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let secret = |key: &str| resolve(key).filter(|v| !is_placeholder(key, v));

        let client_id = secret(REDDIT_CLIENT_ID);
        let client_secret = secret(REDDIT_CLIENT_SECRET);
        let api_key = secret(GROQ_API_KEY);

        let missing: Vec<String> = [
            (REDDIT_CLIENT_ID, client_id.is_none()),
            (REDDIT_CLIENT_SECRET, client_secret.is_none()),
            (GROQ_API_KEY, api_key.is_none()),
        ]
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(key, _)| key.to_string())
        .collect();

        match (client_id, client_secret, api_key) {
            (Some(client_id), Some(client_secret), Some(api_key)) => Ok(Self {
                reddit: RedditCredentials {
                    client_id,
                    client_secret,
                    user_agent: resolve(REDDIT_USER_AGENT)
                        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
                },
                inference: InferenceSettings {
                    api_key,
                    api_url: resolve(GROQ_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                    model: resolve(GROQ_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                    fallback_model: Some(
                        resolve(GROQ_FALLBACK_MODEL)
                            .unwrap_or_else(|| DEFAULT_FALLBACK_MODEL.to_string()),
                    ),
                    max_tokens: 4000,
                    timeout_secs: 60,
                },
            }),
            _ => Err(AnalysisError::Configuration { missing }),
        }
    }
}

fn is_placeholder(key: &str, value: &str) -> bool {
    value == format!("YOUR_{}", key)
}
