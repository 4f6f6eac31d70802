use cacao_core::config::AppConfig;
use config::{Config, ConfigError, Environment, File, Source};

/// Default config file name, looked up in the working directory
const DEFAULT_FILE: &str = "cacao";

/// # Summary
/// Loads the application configuration.
///
/// # Logic
/// 1. Start from `AppConfig::default()`.
/// 2. Overlay the config file (`path`, or `./cacao.{toml,json,yaml}`); a
///    missing default file is fine, a missing explicit file is an error.
/// 3. Overlay `CACAO__SECTION__KEY` environment variables.
///
/// # Arguments
/// * `path`: explicit config file, if any.
///
/// # Returns
/// The merged configuration or a `ConfigError`.
pub fn load(path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(p) => File::with_name(p).required(true),
        None => File::with_name(DEFAULT_FILE).required(false),
    };
    build(file, env_source())
}

fn env_source() -> Environment {
    Environment::with_prefix("CACAO")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn build<S>(file: S, env: Environment) -> Result<AppConfig, ConfigError>
where
    S: Source + Send + Sync + 'static,
{
    Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(file)
        .add_source(env)
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use std::collections::HashMap;

    fn no_env() -> Environment {
        env_source().source(Some(HashMap::new()))
    }

    #[test]
    fn test_defaults_without_sources() {
        let file = File::from_str("", FileFormat::Toml);
        let config = build(file, no_env()).unwrap();
        assert_eq!(config.market.symbol, "CC=F");
        assert_eq!(config.market.cache_ttl_secs, 600);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = File::from_str(
            r#"
            [market]
            window = "1y"
            cache_ttl_secs = 120

            [forecast]
            n_estimators = 10
            "#,
            FileFormat::Toml,
        );
        let config = build(file, no_env()).unwrap();
        assert_eq!(config.market.window, "1y");
        assert_eq!(config.market.cache_ttl_secs, 120);
        assert_eq!(config.market.symbol, "CC=F");
        assert_eq!(config.forecast.n_estimators, 10);
        assert_eq!(config.forecast.seed, 42);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = File::from_str("[server]\nport = 9000\n", FileFormat::Toml);
        let env = env_source().source(Some(HashMap::from([(
            "CACAO__SERVER__PORT".to_string(),
            "9100".to_string(),
        )])));
        let config = build(file, env).unwrap();
        assert_eq!(config.server.port, 9100);
    }
}
