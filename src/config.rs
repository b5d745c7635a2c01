use crate::error::ConfigError;
use serde_derive::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORTAL_URL: &str = "https://buyprepaid.midcityutilities.co.za";
pub const DEFAULT_HA_URL: &str = "http://homeassistant.local:8123/api";
pub const SUPERVISOR_HA_URL: &str = "http://supervisor/core/api";

fn default_log_level() -> String {
    "info".to_string()
}

fn default_options_path() -> String {
    "/data/options.json".to_string()
}

/// Process environment, read once at startup.
#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_options_path")]
    pub options_path: String,
    pub supervisor_token: Option<String>,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        parse_level(&self.log_level)
    }
}

fn parse_level(level: &str) -> tracing::Level {
    tracing::Level::from_str(level).unwrap_or(tracing::Level::INFO)
}

pub(crate) fn load_app_config() -> Result<AppConfig, ConfigError> {
    envy::from_env::<AppConfig>().map_err(ConfigError::env_parse)
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PublisherKind {
    #[default]
    Rest,
    Mqtt,
}

fn default_scan_interval() -> u64 {
    300
}

fn default_mqtt_host() -> String {
    "core-mosquitto".to_string()
}

fn default_mqtt_port() -> u16 {
    1883
}

fn default_portal_url() -> String {
    DEFAULT_PORTAL_URL.to_string()
}

/// The add-on options document.
#[derive(Deserialize, Debug)]
pub struct Options {
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default = "default_scan_interval")]
    pub scan_interval: u64,
    pub log_level: Option<String>,
    #[serde(default)]
    pub ha_token: String,
    #[serde(default)]
    pub ha_url: String,
    #[serde(default)]
    pub publisher: PublisherKind,
    #[serde(default = "default_mqtt_host")]
    pub mqtt_host: String,
    #[serde(default = "default_mqtt_port")]
    pub mqtt_port: u16,
    pub mqtt_username: Option<String>,
    pub mqtt_password: Option<String>,
    #[serde(default = "default_portal_url")]
    pub portal_url: String,
    pub debug_html_path: Option<String>,
}

impl Options {
    /// Log level from the options document, falling back to the environment.
    pub fn log_level(&self, app: &AppConfig) -> tracing::Level {
        match self.log_level.as_deref() {
            Some(level) if !level.trim().is_empty() => parse_level(level.trim()),
            _ => app.log_level(),
        }
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval)
    }
}

pub fn parse_options(json: &str) -> Result<Options, ConfigError> {
    serde_json::from_str(json).map_err(ConfigError::parse)
}

pub fn load_options(path: impl AsRef<Path>) -> Result<Options, ConfigError> {
    let path = path.as_ref();
    let json =
        std::fs::read_to_string(path).map_err(|e| ConfigError::read(path.display().to_string(), e))?;
    parse_options(&json)
}

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub url: String,
    pub username: String,
    pub password: String,
}

/// Blank counts as missing; a present value is returned exactly as given.
fn required(value: &Option<String>, field: &str) -> Result<String, ConfigError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::missing(field)),
    }
}

pub fn portal_config(options: &Options) -> Result<PortalConfig, ConfigError> {
    let username = required(&options.username, "username")?;
    let password = required(&options.password, "password")?;
    if options.scan_interval == 0 {
        return Err(ConfigError::invalid("scan_interval", "must be greater than zero"));
    }
    Ok(PortalConfig {
        url: options.portal_url.trim_end_matches('/').to_string(),
        username,
        password,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeAssistantConfig {
    pub url: String,
    pub token: String,
}

/// Picks the Home Assistant API endpoint.
///
/// A long-lived token from the options wins over the supervisor token, and
/// brings its own URL (or the local default). With neither token there is
/// nothing to authenticate with and `None` is returned.
pub fn home_assistant_config(
    options: &Options,
    supervisor_token: Option<&str>,
) -> Option<HomeAssistantConfig> {
    let ha_token = options.ha_token.trim();
    if !ha_token.is_empty() {
        let ha_url = options.ha_url.trim();
        let url = if ha_url.is_empty() { DEFAULT_HA_URL } else { ha_url };
        return Some(HomeAssistantConfig {
            url: url.trim_end_matches('/').to_string(),
            token: ha_token.to_string(),
        });
    }

    match supervisor_token.map(str::trim) {
        Some(token) if !token.is_empty() => Some(HomeAssistantConfig {
            url: SUPERVISOR_HA_URL.to_string(),
            token: token.to_string(),
        }),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

pub fn mqtt_config(options: &Options) -> MqttConfig {
    let non_empty = |v: &Option<String>| v.as_ref().filter(|s| !s.is_empty()).cloned();
    MqttConfig {
        host: options.mqtt_host.clone(),
        port: options.mqtt_port,
        username: non_empty(&options.mqtt_username),
        password: non_empty(&options.mqtt_password),
    }
}
