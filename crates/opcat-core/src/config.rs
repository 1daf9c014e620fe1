//! Loader configuration.

use std::fmt;
use std::path::PathBuf;

use sqlx::postgres::PgConnectOptions;

/// Default directory holding one subdirectory per operator.
pub const DEFAULT_OPERATORS_ROOT: &str = "/app/op";

/// Default path of the families manifest.
pub const DEFAULT_FAMILIES_PATH: &str = "families.json";

/// Namespace prepended to every implementation entry point.
pub const DEFAULT_ENTRY_POINT_PREFIX: &str = "ikats.algo.";

/// Execution engine recorded for every implementation.
pub const DEFAULT_EXECUTION_PLUGIN: &str =
    "apps.algo.execute.models.business.python_local_exec_engine::PythonLocalExecEngine";

/// Default PostgreSQL port.
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Catalog source and mapping settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Directory holding one subdirectory per operator.
    pub operators_root: PathBuf,
    /// Path of the families manifest.
    pub families_path: PathBuf,
    /// Prefix composed with each catalog's `entry_point`.
    pub entry_point_prefix: String,
    /// Execution engine identifier stored on implementations.
    pub execution_plugin: String,
}

impl SyncConfig {
    /// Create a configuration reading operators from the given root.
    pub fn new(operators_root: impl Into<PathBuf>) -> Self {
        Self {
            operators_root: operators_root.into(),
            families_path: PathBuf::from(DEFAULT_FAMILIES_PATH),
            entry_point_prefix: DEFAULT_ENTRY_POINT_PREFIX.to_string(),
            execution_plugin: DEFAULT_EXECUTION_PLUGIN.to_string(),
        }
    }

    /// Set the families manifest path.
    pub fn with_families_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.families_path = path.into();
        self
    }

    /// Set the entry point prefix.
    pub fn with_entry_point_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.entry_point_prefix = prefix.into();
        self
    }

    /// Set the execution engine identifier.
    pub fn with_execution_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.execution_plugin = plugin.into();
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(DEFAULT_OPERATORS_ROOT)
    }
}

/// PostgreSQL connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Database name. The server default (the user name) applies when unset.
    pub database: Option<String>,
}

impl DbConfig {
    /// Create connection settings for the given host and credentials.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            user: user.into(),
            password: password.into(),
            database: None,
        }
    }

    /// Set the database name.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Build driver connect options.
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password);

        match &self.database {
            Some(database) => options.database(database),
            None => options,
        }
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::new("localhost", DEFAULT_DB_PORT, "postgres", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sync_config() {
        let config = SyncConfig::default();
        assert_eq!(config.operators_root, PathBuf::from("/app/op"));
        assert_eq!(config.families_path, PathBuf::from("families.json"));
        assert_eq!(config.entry_point_prefix, "ikats.algo.");
        assert!(config.execution_plugin.ends_with("::PythonLocalExecEngine"));
    }

    #[test]
    fn test_sync_config_builder() {
        let config = SyncConfig::new("/tmp/op")
            .with_families_path("/etc/opcat/families.json")
            .with_entry_point_prefix("custom.")
            .with_execution_plugin("engine::Local");

        assert_eq!(config.operators_root, PathBuf::from("/tmp/op"));
        assert_eq!(
            config.families_path,
            PathBuf::from("/etc/opcat/families.json")
        );
        assert_eq!(config.entry_point_prefix, "custom.");
        assert_eq!(config.execution_plugin, "engine::Local");
    }

    #[test]
    fn test_db_config_redacts_password() {
        let config = DbConfig::new("db", 5433, "ikats", "s3cret").with_database("catalog");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("<redacted>"));
        assert_eq!(config.database.as_deref(), Some("catalog"));
    }

    #[test]
    fn test_connect_options() {
        let options = DbConfig::new("db.internal", 5433, "ikats", "pw").connect_options();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_username(), "ikats");
    }
}
