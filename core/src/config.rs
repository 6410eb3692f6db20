//! Service configuration loading
//!
//! Three layers, later ones win:
//! 1. Built-in defaults
//! 2. `~/.config/prospect/prospect.toml` (or the file named by `PROSPECT_CONFIG`)
//! 3. Environment overrides (`GEMINI_API_KEY`, `GOOGLE_REFRESH_TOKEN`, ...)
//!
//! Missing credentials are not a load error; the adapters report them the
//! first time they are needed.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid value for ${var}: '{value}' (expected: {expected})")]
    InvalidEnvValue {
        var: String,
        value: String,
        expected: String,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Root configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProspectConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub gemini: GeminiSettings,

    #[serde(default)]
    pub google: GoogleSettings,

    #[serde(default)]
    pub research: ResearchConfig,
}

/// HTTP listener settings
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `0.0.0.0:8080`
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Upper bound for a whole generate request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Gemini API settings
#[derive(Debug, Deserialize, Clone)]
pub struct GeminiSettings {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_gemini_model")]
    pub model: String,

    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Let the model search the web while answering
    #[serde(default = "default_true")]
    pub google_search_grounding: bool,

    #[serde(default)]
    pub temperature: Option<f32>,

    #[serde(default)]
    pub max_output_tokens: Option<u32>,
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
            google_search_grounding: true,
            temperature: None,
            max_output_tokens: None,
        }
    }
}

/// Google OAuth client and document API endpoints
#[derive(Debug, Deserialize, Clone)]
pub struct GoogleSettings {
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,

    /// Long-lived refresh token exchanged for an access token per request
    #[serde(default)]
    pub refresh_token: String,

    #[serde(default = "default_token_url")]
    pub token_url: String,

    #[serde(default = "default_sheets_base_url")]
    pub sheets_base_url: String,

    #[serde(default = "default_drive_base_url")]
    pub drive_base_url: String,
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_drive_base_url() -> String {
    "https://www.googleapis.com".to_string()
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            refresh_token: String::new(),
            token_url: default_token_url(),
            sheets_base_url: default_sheets_base_url(),
            drive_base_url: default_drive_base_url(),
        }
    }
}

/// Who the research is for and what the model should look for
#[derive(Debug, Deserialize, Clone)]
pub struct ResearchConfig {
    /// Brand named in the prompt and in the sheet title
    #[serde(default = "default_brand")]
    pub brand: String,

    /// Group the brand belongs to
    #[serde(default = "default_company")]
    pub company: String,

    #[serde(default = "default_min_companies")]
    pub min_companies: u32,

    #[serde(default = "default_max_companies")]
    pub max_companies: u32,

    /// Brands whose users are top-priority leads
    #[serde(default = "default_competitor_brands")]
    pub competitor_brands: Vec<String>,
}

fn default_brand() -> String {
    "IREX".to_string()
}

fn default_company() -> String {
    "Scarabelli Group".to_string()
}

fn default_min_companies() -> u32 {
    15
}

fn default_max_companies() -> u32 {
    20
}

fn default_competitor_brands() -> Vec<String> {
    [
        "Netafim",
        "Rivulis",
        "Irritec",
        "Hunter",
        "Rain Bird",
        "Toro",
        "Perrot",
        "Grundfos",
        "DAB",
        "Espa",
        "Caprari",
        "Bauer",
        "Naan",
        "Galcon",
        "K-Rain",
        "Eurodrip",
        "Idrofoglia",
        "Wilo",
        "Pedrollo",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            brand: default_brand(),
            company: default_company(),
            min_companies: default_min_companies(),
            max_companies: default_max_companies(),
            competitor_brands: default_competitor_brands(),
        }
    }
}

impl ProspectConfig {
    /// Environment variable for config path override
    pub const ENV_CONFIG_PATH: &'static str = "PROSPECT_CONFIG";

    /// Default config filename
    pub const DEFAULT_CONFIG_FILENAME: &'static str = "prospect.toml";

    /// Load configuration from the default location and environment.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::resolve_config_path())
    }

    /// Load configuration from `path` (defaults when it does not exist),
    /// then apply environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut cfg = if path.exists() {
            Self::load_from_path(path)?
        } else {
            tracing::info!(path = %path.display(), "config not found, using defaults");
            Self::default()
        };

        cfg.apply_env_overrides(|var| env::var(var).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from a TOML file, without environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents)
    }

    /// Parse configuration from TOML string
    pub fn parse(contents: &str) -> Result<Self> {
        let cfg: ProspectConfig = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// `$PROSPECT_CONFIG`, else `~/.config/prospect/prospect.toml`.
    pub fn resolve_config_path() -> PathBuf {
        if let Ok(path) = env::var(Self::ENV_CONFIG_PATH) {
            return PathBuf::from(path);
        }

        dirs::home_dir()
            .map(|h| {
                h.join(".config")
                    .join("prospect")
                    .join(Self::DEFAULT_CONFIG_FILENAME)
            })
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_CONFIG_FILENAME))
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Empty values are ignored so an exported-but-blank variable does not
    /// wipe a value from the file.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let string_overrides: [(&str, &mut String); 6] = [
            ("GEMINI_API_KEY", &mut self.gemini.api_key),
            ("GEMINI_MODEL", &mut self.gemini.model),
            ("GOOGLE_CLIENT_ID", &mut self.google.client_id),
            ("GOOGLE_CLIENT_SECRET", &mut self.google.client_secret),
            ("GOOGLE_REFRESH_TOKEN", &mut self.google.refresh_token),
            ("PROSPECT_BIND", &mut self.server.bind),
        ];

        for (var, slot) in string_overrides {
            if let Some(value) = lookup(var)
                && !value.trim().is_empty()
            {
                tracing::debug!("Applying env override: {var}");
                *slot = value.trim().to_string();
            }
        }

        let timeout_var = "PROSPECT_REQUEST_TIMEOUT_SECS";
        if let Some(value) = lookup(timeout_var)
            && !value.trim().is_empty()
        {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnvValue {
                    var: timeout_var.to_string(),
                    value: value.clone(),
                    expected: "a whole number of seconds".to_string(),
                })?;
            tracing::debug!("Applying env override: {timeout_var}={secs}");
            self.server.request_timeout_secs = secs;
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "server.request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.research.min_companies > self.research.max_companies {
            return Err(ConfigError::Validation(format!(
                "research.min_companies ({}) exceeds research.max_companies ({})",
                self.research.min_companies, self.research.max_companies
            )));
        }

        if self.research.competitor_brands.is_empty() {
            tracing::warn!("No competitor brands configured; no lead will qualify as ALTA");
        }

        Ok(())
    }
}
