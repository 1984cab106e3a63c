use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Upload size ceiling when none is configured (16 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// File extensions accepted for upload when none are configured.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    "txt", "pdf", "png", "jpg", "jpeg", "gif", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
];

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding uploaded file content, keyed by storage name.
    pub root: PathBuf,
    /// Maximum accepted upload size in bytes.
    pub max_file_size: u64,
    /// Lowercase extension allow-list checked against the part after the
    /// last `.` of an uploaded filename.
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let default_extensions: Vec<String> = DEFAULT_ALLOWED_EXTENSIONS
            .iter()
            .map(|e| e.to_string())
            .collect();

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://crm.db?mode=rwc")?
            .set_default("storage.root", "./uploads")?
            .set_default("storage.max_file_size", DEFAULT_MAX_FILE_SIZE)?
            .set_default("storage.allowed_extensions", default_extensions)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., CRM__STORAGE__ROOT)
            .add_source(Environment::with_prefix("CRM").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
