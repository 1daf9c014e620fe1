//! Operator catalog loader.
//!
//! Reads per-operator `catalog_def*.json` descriptors and projects them into
//! the relational catalog schema (families, algorithms, implementations and
//! profile items):
//!
//! - [`discovery`] finds and parses catalog files in operator directories
//! - [`normalize`] fills defaults and encodes parameter values
//! - [`sqlgen`] turns a normalized catalog into ordered, parameterized SQL
//! - [`executor`] runs each catalog's statements as one transaction
//! - [`loader`] ties the steps together and reports per operator

pub mod config;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod family;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod sanitize;
pub mod sqlgen;
pub mod statement;

pub use config::{DbConfig, SyncConfig};
pub use discovery::{discover, list_operators, Discovery};
pub use error::{Error, ExecError};
pub use executor::{BatchExecutor, PgExecutor};
pub use family::{FamilyDef, FamilyManifest, UNCATEGORIZED};
pub use loader::{CatalogLoader, FailedCatalog, OperatorReport};
pub use model::{Catalog, CatalogDef, Parameter, ProfileItem};
pub use normalize::{normalize, NormalizeWarning, Normalized};
pub use sanitize::Sanitize;
pub use statement::{Batch, SqlValue, Statement};
