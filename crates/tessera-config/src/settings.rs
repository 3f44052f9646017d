use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log:  LogSettings,
    pub memo: MemoSettings,
    pub pool: PoolSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoSettings {
    /// Entries kept per memo before the least recently used is dropped.
    pub capacity:  usize,
    /// Keep every entry; `capacity` is ignored.
    pub unbounded: bool,
}

impl MemoSettings {
    /// Entry limit, `None` when unbounded.
    pub fn limit(&self) -> Option<usize> {
        if self.unbounded { None } else { Some(self.capacity) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    pub workers:        usize,
    /// Absent means one task per worker.
    pub max_concurrent: Option<usize>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for MemoSettings {
    fn default() -> Self {
        Self {
            capacity:  1024,
            unbounded: false,
        }
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            workers:        4,
            max_concurrent: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let level = self.log.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid {
                key:    "log.level",
                reason: format!("expected one of {}, got '{}'", LOG_LEVELS.join(", "), self.log.level),
            });
        }
        if self.memo.limit() == Some(0) {
            return Err(ConfigError::Invalid {
                key:    "memo.capacity",
                reason: "must be at least 1; set memo.unbounded for no limit".to_string(),
            });
        }
        if self.pool.workers == 0 {
            return Err(ConfigError::Invalid {
                key:    "pool.workers",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.pool.max_concurrent == Some(0) {
            return Err(ConfigError::Invalid {
                key:    "pool.max_concurrent",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> { Ok(toml::to_string_pretty(self)?) }
}
