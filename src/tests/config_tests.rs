#[cfg(test)]
mod tests {
    use crate::config::{self, AppConfig};
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Tests that touch process environment must not interleave
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn write_temp_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_body_bytes, 1024 * 1024);
        assert_eq!(config.database.url, "sqlite://data/bookshelf.db");
        assert_eq!(config.database.max_connections, 16);
        assert_eq!(config.logging.directory, "logs");
        assert!(config.security.is_none());
        assert!(config::validate(&config).is_ok());
    }

    #[test]
    fn test_valid_config_does_not_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        assert!(config::load().is_ok());
    }

    #[test]
    fn test_config_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        env::set_var("BOOKSHELF__SERVER__HOST", "0.0.0.0");
        env::set_var("BOOKSHELF__SERVER__PORT", "3000");
        env::set_var("BOOKSHELF__DATABASE__URL", "sqlite://test.db");

        let result = config::load();

        env::remove_var("BOOKSHELF__SERVER__HOST");
        env::remove_var("BOOKSHELF__SERVER__PORT");
        env::remove_var("BOOKSHELF__DATABASE__URL");

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite://test.db");
    }

    #[test]
    fn test_invalid_server_port() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        env::set_var("BOOKSHELF__SERVER__PORT", "0");
        let result = config::load();
        env::remove_var("BOOKSHELF__SERVER__PORT");

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid server.port"));
    }

    #[test]
    fn test_config_from_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let file = write_temp_config(
            r#"
[server]
port = 9000

[database]
url = "sqlite://custom.db"
max_connections = 4

[security]
enable_hsts = true
"#,
        );
        env::set_var("BOOKSHELF_CONFIG", file.path());
        let result = config::load();
        env::remove_var("BOOKSHELF_CONFIG");

        let config = result.unwrap();
        assert_eq!(config.server.port, 9000);
        // Keys absent from the file keep their defaults
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.url, "sqlite://custom.db");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.security.unwrap().enable_hsts, Some(true));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(config::validate(&config).unwrap_err().to_string().contains("max_connections"));

        let mut config = AppConfig::default();
        config.database.max_connections = 1000;
        assert!(config::validate(&config).is_err());

        let mut config = AppConfig::default();
        config.database.url = "  ".to_string();
        assert!(config::validate(&config).unwrap_err().to_string().contains("database.url"));

        let mut config = AppConfig::default();
        config.server.max_body_bytes = 0;
        assert!(config::validate(&config).is_err());
    }

    #[test]
    fn test_ensure_sqlite_parent_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let db_path = dir.path().join("a").join("b").join("books.db");
        config::ensure_sqlite_parent_dir(&format!("sqlite://{}?mode=rwc", db_path.display())).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());

        // Non-file URLs are left alone
        config::ensure_sqlite_parent_dir("sqlite::memory:").unwrap();
    }
}
