use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Directory for the daily-rotated log file.
    pub directory: String,
    pub file_name: String,
    /// Used when `RUST_LOG` is not set.
    pub filter: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SecurityConfig {
    pub enable_hsts: Option<bool>,
    pub hsts_max_age: Option<u64>,
    pub hsts_include_subdomains: Option<bool>,
    pub csp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: Option<SecurityConfig>,
}

const DEFAULTS: &str = include_str!("../config/default.toml");

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        match ::config::Config::builder()
            .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
            .build()
            .and_then(|cfg| cfg.try_deserialize())
        {
            Ok(app_cfg) => app_cfg,
            Err(e) => {
                eprintln!("FATAL: Failed to load embedded default config: {}", e);
                panic!("Failed to load embedded default config: {}", e);
            }
        }
    }
}

pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        // Optional local file: bookshelf.toml (in CWD)
        .add_source(::config::File::with_name("bookshelf").required(false));

    if let Ok(custom_path) = std::env::var("BOOKSHELF_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("BOOKSHELF").separator("__"));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    #[cfg(unix)]
    if cfg.server.port < 1024 {
        tracing::warn!("Using privileged port {} - may require elevated permissions", cfg.server.port);
    }
    if cfg.server.max_body_bytes == 0 {
        return Err(anyhow::anyhow!("server.max_body_bytes must be > 0"));
    }

    if cfg.database.url.trim().is_empty() {
        return Err(anyhow::anyhow!("database.url must not be empty"));
    }
    if cfg.database.max_connections == 0 || cfg.database.max_connections > 256 {
        return Err(anyhow::anyhow!("database.max_connections must be in 1..=256"));
    }

    Ok(())
}

/// Creates the parent directory of a file-backed `sqlite://` URL.
pub fn ensure_sqlite_parent_dir(url: &str) -> anyhow::Result<()> {
    if let Some(path) = url.strip_prefix("sqlite://") {
        // sqlite:///C:/... on Windows
        #[cfg(windows)]
        let path = match path.as_bytes() {
            [b'/', drive, b':', ..] if drive.is_ascii_alphabetic() => &path[1..],
            _ => path,
        };
        // Drop query options such as ?mode=rwc
        let path = path.split('?').next().unwrap_or(path);
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }
    Ok(())
}
