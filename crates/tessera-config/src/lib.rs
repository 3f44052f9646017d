//! Layered settings.
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. a TOML file (`tessera.toml` in the working directory, or an explicit path)
//! 3. `TESSERA_`-prefixed environment variables, `__` separating nested keys
//!    (`TESSERA_POOL__WORKERS=8`)

mod error;
mod settings;

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

pub use error::{ConfigError, Result};
pub use settings::{LogSettings, MemoSettings, PoolSettings, Settings};

pub const CONFIG_FILE: &str = "tessera.toml";
pub const ENV_PREFIX: &str = "TESSERA_";

/// The provider stack without extraction, for callers layering more on top.
///
/// An explicit `path` must exist; the default file is optional.
pub fn figment(path: Option<&Path>) -> Result<Figment> {
    let file = match path {
        Some(path) if !path.exists() => return Err(ConfigError::Missing(path.to_path_buf())),
        Some(path) => Toml::file(path),
        None => Toml::file(CONFIG_FILE),
    };

    Ok(Figment::from(Serialized::defaults(Settings::default()))
        .merge(file)
        .merge(Env::prefixed(ENV_PREFIX).split("__")))
}

/// Load and validate settings.
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let settings: Settings = figment(path)?.extract()?;
    settings.validate()?;
    Ok(settings)
}
