//! Catalog definition discovery in operator directories.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::model::CatalogDef;

/// Catalog definition file name: `catalog_def.json`, `catalog_def_1.json`
/// up to `catalog_def_99.json`.
const CATALOG_FILE_PATTERN: &str = r"^catalog_def(_[0-9]{1,2})?\.json$";

fn catalog_file_regex() -> Result<&'static Regex, &'static regex::Error> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(CATALOG_FILE_PATTERN))
        .as_ref()
}

/// Check whether a file name designates a catalog definition.
pub fn is_catalog_file(file_name: &str) -> bool {
    match catalog_file_regex() {
        Ok(pattern) => pattern.is_match(file_name),
        Err(e) => {
            tracing::error!(error = %e, "invalid catalog file pattern");
            false
        }
    }
}

/// A catalog definition with the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredCatalog {
    pub path: PathBuf,
    pub definition: CatalogDef,
}

/// Why a catalog file was skipped.
#[derive(Debug)]
pub enum FailureReason {
    Read(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Read(e) => write!(f, "unreadable: {}", e),
            FailureReason::Parse(e) => write!(f, "JSON bad format: {}", e),
        }
    }
}

/// A catalog file that could not be used.
#[derive(Debug)]
pub struct DiscoveryFailure {
    pub path: PathBuf,
    pub reason: FailureReason,
}

/// Catalog definitions found for one operator.
#[derive(Debug, Default)]
pub struct Discovery {
    pub catalogs: Vec<DiscoveredCatalog>,
    pub failures: Vec<DiscoveryFailure>,
}

/// Read every catalog definition of `root/operator`, in file name order.
///
/// Unreadable or malformed files are logged and recorded as failures; they
/// never stop the scan.
pub fn discover(root: &Path, operator: &str) -> Discovery {
    let dir = root.join(operator);
    let mut discovery = Discovery::default();

    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                operator,
                dir = %dir.display(),
                error = %e,
                "operator directory not readable"
            );
            return discovery;
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_str().is_some_and(is_catalog_file))
        .map(|entry| entry.path())
        // follows symlinks
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    for path in paths {
        match read_catalog(&path) {
            Ok(definition) => discovery.catalogs.push(DiscoveredCatalog { path, definition }),
            Err(reason) => {
                let file = path.file_name().map(|name| name.to_string_lossy().into_owned());
                tracing::error!(
                    operator,
                    file = ?file,
                    error = %reason,
                    "JSON bad format for op-{}",
                    operator
                );
                tracing::warn!(operator, file = ?file, "operator {} is ignored", operator);
                discovery.failures.push(DiscoveryFailure { path, reason });
            }
        }
    }

    discovery
}

fn read_catalog(path: &Path) -> Result<CatalogDef, FailureReason> {
    let content = std::fs::read_to_string(path).map_err(FailureReason::Read)?;
    serde_json::from_str(&content).map_err(FailureReason::Parse)
}

/// Names of every operator directory under `root`, sorted.
pub fn list_operators(root: &Path) -> Result<Vec<String>, crate::Error> {
    let entries = std::fs::read_dir(root).map_err(|e| crate::Error::io(root, e))?;

    let mut operators: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    operators.sort();

    Ok(operators)
}
