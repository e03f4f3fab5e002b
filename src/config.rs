use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const FALLBACK_AVATAR_URL: &str = "https://ionicframework.com/docs/img/demos/avatar.svg";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_tick_rate")]
    pub tick_rate_fps: f64,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Unset means the HTTP client's own default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_true")]
    pub check_avatars: bool,
    #[serde(default = "default_avatar_check_concurrency")]
    pub avatar_check_concurrency: usize,
    #[serde(default = "default_fallback_avatar_url")]
    pub fallback_avatar_url: String,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_tick_rate() -> f64 {
    30.0
}

fn default_api_base_url() -> String {
    "https://futuramaapi.com/api".to_string()
}

fn default_page_size() -> u32 {
    50
}

fn default_true() -> bool {
    true
}

fn default_avatar_check_concurrency() -> usize {
    8
}

fn default_fallback_avatar_url() -> String {
    FALLBACK_AVATAR_URL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_fps: default_tick_rate(),
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
            request_timeout_secs: None,
            check_avatars: default_true(),
            avatar_check_concurrency: default_avatar_check_concurrency(),
            fallback_avatar_url: default_fallback_avatar_url(),
            log_file: None,
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/futurama-tui/config.toml"))
}

pub fn load_config() -> AppConfig {
    let Some(path) = config_path() else {
        return AppConfig::default();
    };

    let Ok(contents) = fs::read_to_string(&path) else {
        return AppConfig::default();
    };

    parse_config(&contents)
}

fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_default()
}
