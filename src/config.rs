use std::fmt;
use std::net::SocketAddr;

use crate::layout::SourceLayout;

pub const ADDR_VAR: &str = "TIMETABLE_HTTP_ADDR";
pub const MAX_UPLOAD_VAR: &str = "TIMETABLE_MAX_UPLOAD_BYTES";
pub const ARCHIVE_NAME_VAR: &str = "TIMETABLE_ARCHIVE_NAME";
pub const LAYOUT_VAR: &str = "TIMETABLE_LAYOUT";
pub const LOG_VAR: &str = "TIMETABLE_LOG";

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;
const DEFAULT_ARCHIVE_NAME: &str = "hat_saatleri.zip";

#[derive(Debug, Clone)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Runtime settings for the upload service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub addr: SocketAddr,
    pub max_upload_bytes: usize,
    pub archive_name: String,
    pub layout: SourceLayout,
    pub log_verbosity: u8,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            layout: SourceLayout::default(),
            log_verbosity: 1,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let addr = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        config.addr = addr
            .parse()
            .map_err(|err| ConfigError::new(format!("invalid {ADDR_VAR} '{addr}': {err}")))?;

        if let Some(raw) = lookup(MAX_UPLOAD_VAR) {
            config.max_upload_bytes = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|bytes| *bytes > 0)
                .ok_or_else(|| ConfigError::new(format!("invalid {MAX_UPLOAD_VAR} '{raw}'")))?;
        }

        if let Some(name) = lookup(ARCHIVE_NAME_VAR) {
            let name = name.trim();
            if name.is_empty() || name.contains(['"', '/', '\\']) {
                return Err(ConfigError::new(format!(
                    "invalid {ARCHIVE_NAME_VAR} '{name}'"
                )));
            }
            config.archive_name = name.to_string();
        }

        if let Some(path) = lookup(LAYOUT_VAR) {
            config.layout = SourceLayout::load_json(&path)
                .map_err(|err| ConfigError::new(format!("cannot load layout '{path}': {err}")))?;
        }

        if let Some(raw) = lookup(LOG_VAR) {
            config.log_verbosity = raw
                .trim()
                .parse::<u8>()
                .map_err(|_| ConfigError::new(format!("invalid {LOG_VAR} '{raw}'")))?;
        }

        Ok(config)
    }
}
