use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::{env, fs};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub token_refresh_threshold_minutes: u64,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    /// Loads the configuration from the given env file (and the process
    /// environment) exactly once. Later calls return the first result.
    pub fn init(env_path: &str) -> &'static Self {
        dotenvy::from_filename(env_path).ok();

        CONFIG.get_or_init(|| {
            let project_name = env::var("PROJECT_NAME").unwrap_or_else(|_| "support-desk".into());
            let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into());
            let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into());
            let log_to_stdout =
                env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true";
            let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
            let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
            let port = env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000);

            if let Some(parent) = std::path::Path::new(&log_file).parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).expect("Failed to create log directory");
                }
            }

            let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
            let jwt_duration_minutes = env::var("JWT_DURATION_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(1440);
            let token_refresh_threshold_minutes = env::var("TOKEN_REFRESH_THRESHOLD_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(30);

            Config {
                project_name,
                log_level,
                log_file,
                log_to_stdout,
                database_url,
                host,
                port,
                jwt_secret,
                jwt_duration_minutes,
                token_refresh_threshold_minutes,
            }
        })
    }

    /// Returns the initialized configuration.
    ///
    /// # Panics
    /// Panics if `init` has not been called yet.
    pub fn get() -> &'static Self {
        CONFIG.get().expect("Config not initialized")
    }

    /// Like `get`, but initializes from `.env` on first use. Test binaries
    /// have no startup sequence of their own and go through this.
    pub fn get_or_init_from_env() -> &'static Self {
        match CONFIG.get() {
            Some(cfg) => cfg,
            None => Config::init(".env"),
        }
    }
}
