//! Application configuration model.

use serde::{Deserialize, Serialize};

use super::budget::BudgetRatios;

/// Main configuration structure for daytrip
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Gateway server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream recommendation API configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Budget split and sampling configuration
    #[serde(default)]
    pub recommendation: RecommendationConfig,

    /// Session state storage configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gateway server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to enable permissive CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    5000
}

const fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_true(),
        }
    }
}

/// Upstream recommendation API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpstreamConfig {
    /// Base URL of the recommendation API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Search radius used when a request does not give one, in metres
    #[serde(default = "default_radius_m")]
    pub default_radius_m: u32,

    /// Category pool endpoint paths
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

fn default_base_url() -> String {
    "https://place-crawling.onrender.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

const fn default_radius_m() -> u32 {
    5000
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            default_radius_m: default_radius_m(),
            endpoints: EndpointsConfig::default(),
        }
    }
}

/// Upstream paths serving each category's candidate pool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EndpointsConfig {
    /// Food pool path.
    #[serde(default = "default_food_path")]
    pub food: String,

    /// Cafe pool path.
    #[serde(default = "default_cafe_path")]
    pub cafe: String,

    /// Activity pool path.
    #[serde(default = "default_activity_path")]
    pub activity: String,
}

fn default_food_path() -> String {
    "/restaurants".to_string()
}

fn default_cafe_path() -> String {
    "/cafes".to_string()
}

fn default_activity_path() -> String {
    "/activities".to_string()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            food: default_food_path(),
            cafe: default_cafe_path(),
            activity: default_activity_path(),
        }
    }
}

/// What to do when history has excluded every eligible venue of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Leave the slot empty for the rest of the session
    #[default]
    KeepEmpty,
    /// Forget that category's history and draw again, allowing repeats
    ResetHistory,
}

/// Budget split and sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RecommendationConfig {
    /// Requests at or below this per-person budget are rejected
    #[serde(default = "default_min_per_person_budget")]
    pub min_per_person_budget: u64,

    /// Behaviour once a category's pool is exhausted by history
    #[serde(default)]
    pub exhaustion_policy: ExhaustionPolicy,

    /// Category shares of the total budget, in basis points
    #[serde(default)]
    pub ratios: BudgetRatios,
}

const fn default_min_per_person_budget() -> u64 {
    50_000
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            min_per_person_budget: default_min_per_person_budget(),
            exhaustion_policy: ExhaustionPolicy::default(),
            ratios: BudgetRatios::default(),
        }
    }
}

/// Session state storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionConfig {
    /// File backing the CLI's session store
    #[serde(default = "default_state_path")]
    pub state_path: String,
}

fn default_state_path() -> String {
    ".daytrip/session.json".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stdout only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,

    /// Rotation for file logs: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
