use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Test,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub roster_path: PathBuf,
    pub public_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub log_to_files: bool,
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("test") => Environment::Test,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Test => Self::test(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides; the specific var wins over the generic PORT
        if let Ok(v) = env::var("CLUB_API_HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("CLUB_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse().ok())
        {
            self.server.port = port;
        }

        // Storage overrides
        if let Ok(v) = env::var("ROSTER_PATH") {
            self.storage.roster_path = PathBuf::from(v);
        }
        if let Ok(v) = env::var("PUBLIC_DIR") {
            self.storage.public_dir = PathBuf::from(v);
        }

        // Logging overrides
        if let Ok(v) = env::var("LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Ok(v) = env::var("LOG_TO_FILES") {
            self.logging.log_to_files = v.parse().unwrap_or(self.logging.log_to_files);
        }
        if let Ok(v) = env::var("LOG_DIR") {
            self.logging.log_dir = PathBuf::from(v);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            storage: StorageConfig {
                roster_path: PathBuf::from("data/students.json"),
                public_dir: PathBuf::from("public"),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                log_to_files: true,
                log_dir: PathBuf::from("."),
            },
        }
    }

    fn test() -> Self {
        Self {
            environment: Environment::Test,
            logging: LoggingConfig {
                level: "warn".to_string(),
                log_to_files: false,
                log_dir: PathBuf::from("."),
            },
            ..Self::development()
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            logging: LoggingConfig {
                level: "info".to_string(),
                log_to_files: true,
                log_dir: PathBuf::from("logs"),
            },
            ..Self::development()
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
