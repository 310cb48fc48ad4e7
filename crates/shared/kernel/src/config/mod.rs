use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Base name probed when no explicit config file is given (`closetr.toml`, `closetr.json`, ...).
pub const DEFAULT_CONFIG_NAME: &str = "closetr";

/// Prefix of environment overrides, e.g. `CLOSETR__REGISTER__REQUEST_TIMEOUT_MS`.
pub const ENV_PREFIX: &str = "CLOSETR";

/// Errors raised while assembling configuration.
#[closetr_derive::closetr_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads `T` from an optional file layered under environment overrides.
///
/// 1. **File**: an explicit `path` must exist; its format follows the extension.
///    Without a path, `closetr.{toml,json,yaml,...}` in the working directory is used when present.
/// 2. **Environment**: variables prefixed with `CLOSETR__`, nested with `__`
///    (`CLOSETR__LOGGING__LEVEL` maps to `logging.level`).
///
/// Missing keys fall back to `T`'s serde defaults.
///
/// # Errors
/// Returns [`ConfigError::Config`] when an explicit file is missing or unreadable,
/// or when the merged values do not deserialize into `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, None)
}

/// `env` replaces the process environment when set.
fn load_layered<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (file, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_NAME), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    if required {
        info!("Loading config from {}", file.display());
    } else {
        debug!("Probing optional config {}", file.display());
    }

    // Env values arrive as strings; numbers and booleans must be parsed.
    let config = Config::builder()
        .add_source(File::from(file.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake)
                .try_parsing(true)
                .source(env),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use closetr_domain::config::AppConfig;
    use std::io::Write;

    #[test]
    fn explicit_toml_file_is_loaded() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[register]\nrequest_timeout_ms = 1500\n\n[logging]\nlevel = \"debug\"").unwrap();

        let cfg: AppConfig = load_config(Some(file.path())).unwrap();
        assert_eq!(cfg.register.request_timeout_ms, 1500);
        assert_eq!(cfg.register.session_timeout_ms, 5_000);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config::<AppConfig>(Some(dir.path().join("absent.toml"))).unwrap_err();

        assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
    }

    #[test]
    fn wrong_types_fail_to_deserialize() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "register": {{ "request_timeout_ms": "soon" }} }}"#).unwrap();

        let err = load_config::<AppConfig>(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to deserialize config"));
    }

    fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect())
    }

    #[test]
    fn env_overrides_win_over_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[register]\nrequest_timeout_ms = 1500\n\n[logging]\nlevel = \"warn\"").unwrap();

        let cfg: AppConfig = load_layered(
            Some(file.path()),
            env(&[
                ("CLOSETR__REGISTER__REQUEST_TIMEOUT_MS", "42"),
                ("CLOSETR__REGISTER__SESSION_TIMEOUT_MS", "7"),
                ("CLOSETR__LOGGING__LEVEL", "debug"),
                ("CLOSETR__LOGGING__JSON", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.register.request_timeout_ms, 42);
        assert_eq!(cfg.register.session_timeout_ms, 7);
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.logging.json);
    }

    #[test]
    fn unprefixed_env_is_ignored() {
        let cfg: AppConfig = load_layered(
            None::<&Path>,
            env(&[("REGISTER__REQUEST_TIMEOUT_MS", "42"), ("CLOSETR_LOGGING_LEVEL", "trace")]),
        )
        .unwrap();

        assert_eq!(cfg.register.request_timeout_ms, 10_000);
        assert_eq!(cfg.logging.level, "info");
    }
}
