use config::{Case, Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix for environment overrides (`RSVP__DATABASE__URL` -> `database.url`).
pub const ENV_PREFIX: &str = "RSVP";

#[rsvp_derive::rsvp_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads `T` from a config file layered with environment overrides.
///
/// 1. **Base file**: `path` (extension optional, e.g. `server` finds `server.toml`);
///    defaults to `server` in the working directory. The file is required.
/// 2. **Environment**: variables prefixed with `RSVP__`, nested with `__`.
///
/// # Errors
/// Returns [`ConfigError::Config`] when the file is missing or the merged
/// values do not deserialize into `T`.
///
/// # Example
/// ```rust,no_run
/// use rsvp_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = path.map_or_else(|| PathBuf::from("server"), |p| p.as_ref().to_path_buf());
    info!(path = %path.display(), "Loading configuration");

    let config = Config::builder()
        .add_source(File::from(path.as_path()).required(true))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__").convert_case(Case::Snake))
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
