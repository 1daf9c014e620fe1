//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use opcat_core::config::{
    DEFAULT_DB_PORT, DEFAULT_ENTRY_POINT_PREFIX, DEFAULT_EXECUTION_PLUGIN, DEFAULT_FAMILIES_PATH,
    DEFAULT_OPERATORS_ROOT,
};
use opcat_core::{DbConfig, SyncConfig};

/// Operator catalog loader.
#[derive(Debug, Parser)]
#[command(name = "opcat")]
#[command(version, about = "Load operator catalog definitions into the catalog database")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding one subdirectory per operator.
    #[arg(long, env = "OP_PATH", default_value = DEFAULT_OPERATORS_ROOT, global = true)]
    pub operators_root: PathBuf,

    /// Families manifest.
    #[arg(long, env = "FAMILIES_PATH", default_value = DEFAULT_FAMILIES_PATH, global = true)]
    pub families: PathBuf,

    /// Namespace prepended to implementation entry points.
    #[arg(long, default_value = DEFAULT_ENTRY_POINT_PREFIX, global = true)]
    pub entry_point_prefix: String,

    /// Execution engine recorded on implementations.
    #[arg(long, default_value = DEFAULT_EXECUTION_PLUGIN, global = true)]
    pub execution_plugin: String,

    /// Database host.
    #[arg(long, env = "DB_HOST", default_value = "localhost", global = true)]
    pub db_host: String,

    /// Database port.
    #[arg(long, env = "DB_PORT", default_value_t = DEFAULT_DB_PORT, global = true)]
    pub db_port: u16,

    /// Database user.
    #[arg(long, env = "DB_USER", default_value = "postgres", global = true)]
    pub db_user: String,

    /// Database password.
    #[arg(long, env = "DB_PWD", default_value = "", hide_env_values = true, global = true)]
    pub db_password: String,

    /// Database name (server default when unset).
    #[arg(long, env = "DB_NAME", global = true)]
    pub db_name: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Truncate every catalog table.
    Reset,
    /// Insert the families of the manifest.
    Families,
    /// Load the catalogs of the given operators.
    Load {
        #[arg(required = true)]
        operators: Vec<String>,
    },
    /// Load the catalogs of every operator under the operators root.
    LoadAll,
    /// Reset, insert families, then load every operator.
    Sync,
    /// Print the SQL an operator's catalogs would execute.
    Render { operator: String },
}

impl From<&Args> for SyncConfig {
    fn from(args: &Args) -> Self {
        SyncConfig::new(&args.operators_root)
            .with_families_path(&args.families)
            .with_entry_point_prefix(&args.entry_point_prefix)
            .with_execution_plugin(&args.execution_plugin)
    }
}

impl From<&Args> for DbConfig {
    fn from(args: &Args) -> Self {
        let config = DbConfig::new(&args.db_host, args.db_port, &args.db_user, &args.db_password);
        match &args.db_name {
            Some(name) => config.with_database(name),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_requires_operator() {
        assert!(Args::try_parse_from(["opcat", "load"]).is_err());
    }

    #[test]
    fn test_parse_load() {
        let args = Args::try_parse_from([
            "opcat",
            "load",
            "cut_ts",
            "quality_stats",
            "--operators-root",
            "/srv/op",
            "--db-host",
            "db",
            "--db-name",
            "catalog",
        ])
        .unwrap();

        match &args.command {
            Command::Load { operators } => assert_eq!(operators, &["cut_ts", "quality_stats"]),
            other => panic!("unexpected command {:?}", other),
        }

        let sync = SyncConfig::from(&args);
        assert_eq!(sync.operators_root, PathBuf::from("/srv/op"));

        let db = DbConfig::from(&args);
        assert_eq!(db.host, "db");
        assert_eq!(db.database.as_deref(), Some("catalog"));
    }

    #[test]
    fn test_parse_render() {
        let args = Args::try_parse_from(["opcat", "render", "cut_ts"]).unwrap();
        assert!(matches!(args.command, Command::Render { ref operator } if operator == "cut_ts"));
    }
}
