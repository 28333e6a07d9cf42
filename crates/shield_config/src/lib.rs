use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
pub mod models;
pub use models::*;

/// Loads the unified application configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. `config/default` (any extension the `config` crate understands)
/// 2. `config/{RUN_ENV}` (RUN_ENV defaults to "debug")
/// 3. Environment variables with the `SHIELD` prefix and `__` separator,
///    e.g. `SHIELD_SERVER__PORT=8080`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "SHIELD".to_string());

    let config_dir = env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(raw_config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is loaded at most once per process. `DOTENV_OVERRIDE` selects an
/// alternative file; otherwise ".env" next to the working directory is used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_deserializes_with_only_server_section() {
        let cfg: AppConfig = serde_json::from_str(
            r#"{ "server": { "host": "127.0.0.1", "port": 5000 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert!(!cfg.use_gcal);
        assert!(!cfg.use_mailer);
        assert!(cfg.gcal.is_none());
        assert!(cfg.mailer.is_none());
    }

    #[test]
    fn optional_sections_parse() {
        let cfg: AppConfig = serde_json::from_str(
            r#"{
                "server": { "host": "0.0.0.0", "port": 5000 },
                "use_gcal": true,
                "use_mailer": true,
                "gcal": { "key_path": "service-account.json", "calendar_id": "ops@shieldsupport.example", "time_zone": "Asia/Kolkata" },
                "mailer": { "key_path": "service-account.json", "operator_email": "ops@shieldsupport.example", "sender_name": "Shield Support" },
                "auth": { "token_ttl_hours": 24 }
            }"#,
        )
        .unwrap();
        assert!(cfg.use_gcal);
        assert_eq!(
            cfg.gcal.unwrap().calendar_id.as_deref(),
            Some("ops@shieldsupport.example")
        );
        assert_eq!(cfg.auth.unwrap().token_ttl_hours, Some(24));
    }
}
