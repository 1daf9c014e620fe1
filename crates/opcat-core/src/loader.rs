//! Catalog loading workflow: reset, families, then operators.

use std::path::PathBuf;

use crate::config::SyncConfig;
use crate::discovery::{discover, list_operators};
use crate::error::{Error, ExecError};
use crate::executor::BatchExecutor;
use crate::family::FamilyManifest;
use crate::normalize::normalize;
use crate::sqlgen::{catalog_script, catalog_statements, family_statements, RESET_TABLES};
use crate::statement::{Batch, Statement};

/// A catalog whose batch was rejected.
#[derive(Debug)]
pub struct FailedCatalog {
    pub name: String,
    pub error: ExecError,
}

/// Outcome of loading one operator directory.
#[derive(Debug, Default)]
pub struct OperatorReport {
    pub operator: String,
    /// Names of the catalogs committed.
    pub loaded: Vec<String>,
    pub failed: Vec<FailedCatalog>,
    /// Catalog files that could not be read or parsed.
    pub skipped_files: Vec<PathBuf>,
    /// Content-quality warnings raised while normalizing.
    pub warnings: usize,
}

impl OperatorReport {
    fn new(operator: &str) -> Self {
        Self {
            operator: operator.to_string(),
            ..Self::default()
        }
    }

    /// True when every discovered catalog was loaded and no file was skipped.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.skipped_files.is_empty()
    }
}

/// Drives discovery, normalization, SQL generation and execution.
pub struct CatalogLoader<E> {
    config: SyncConfig,
    families: FamilyManifest,
    executor: E,
}

impl<E: BatchExecutor> CatalogLoader<E> {
    pub fn new(config: SyncConfig, families: FamilyManifest, executor: E) -> Self {
        Self {
            config,
            families,
            executor,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Truncate every catalog table, most dependent first.
    ///
    /// Each table is its own batch so a missing table does not prevent the
    /// others from being cleared. Returns the number of tables that failed.
    pub async fn delete_catalog_postgres(&self) -> usize {
        let mut failures = 0;

        for &(table, sql) in RESET_TABLES.iter() {
            let batch = Batch::new(
                format!("truncate {}", table),
                vec![Statement::new(sql, Vec::new())],
            );
            if let Err(e) = self.executor.execute(&batch).await {
                tracing::error!(table, error = %e, "failed to truncate table");
                failures += 1;
            }
        }

        tracing::info!(tables = RESET_TABLES.len(), failures, "catalog tables reset");
        failures
    }

    /// Insert every manifest family, one batch each. Returns the number of
    /// families that failed.
    pub async fn populate_catalog_families(&self) -> usize {
        let mut failures = 0;

        let statements = family_statements(&self.families);
        let total = statements.len();
        for (family, statement) in self.families.iter().zip(statements) {
            let batch = Batch::new(format!("family {}", family.name), vec![statement]);
            if let Err(e) = self.executor.execute(&batch).await {
                tracing::error!(family = %family.name, error = %e, "failed to insert family");
                failures += 1;
            }
        }

        tracing::info!(families = total, failures, "families populated");
        failures
    }

    /// Load every catalog definition of one operator.
    ///
    /// Each catalog is one transaction; a failing catalog is logged and the
    /// next one is still processed.
    pub async fn process_operator_catalog(&self, operator: &str) -> OperatorReport {
        let discovery = discover(&self.config.operators_root, operator);
        let mut report = OperatorReport::new(operator);
        report.skipped_files = discovery.failures.into_iter().map(|f| f.path).collect();

        if discovery.catalogs.is_empty() {
            tracing::info!(operator, "no catalog definition found");
            return report;
        }

        tracing::info!(
            operator,
            catalogs = discovery.catalogs.len(),
            "processing catalog definitions"
        );

        for discovered in discovery.catalogs {
            let normalized = normalize(discovered.definition, &self.families, &self.config);
            report.warnings += normalized.warnings.len();

            let catalog = normalized.catalog;
            let batch = Batch::new(
                format!("catalog {}", catalog.name),
                catalog_statements(&catalog, &self.config),
            );

            match self.executor.execute(&batch).await {
                Ok(()) => {
                    tracing::debug!(
                        operator,
                        catalog = %catalog.name,
                        path = %discovered.path.display(),
                        "catalog loaded"
                    );
                    report.loaded.push(catalog.name);
                }
                Err(error) => {
                    tracing::error!(
                        operator,
                        catalog = %catalog.name,
                        error = %error,
                        "catalog not loaded"
                    );
                    report.failed.push(FailedCatalog {
                        name: catalog.name,
                        error,
                    });
                }
            }
        }

        if report.failed.is_empty() {
            tracing::info!(
                operator,
                loaded = report.loaded.len(),
                "operator catalog processed with success"
            );
        } else {
            tracing::warn!(
                operator,
                loaded = report.loaded.len(),
                failed = report.failed.len(),
                "operator catalog partially processed"
            );
        }

        report
    }

    /// Load every operator found under the operators root.
    pub async fn process_all(&self) -> Result<Vec<OperatorReport>, Error> {
        let operators = list_operators(&self.config.operators_root)?;
        tracing::info!(
            operators = operators.len(),
            root = %self.config.operators_root.display(),
            "loading all operators"
        );

        let mut reports = Vec::with_capacity(operators.len());
        for operator in &operators {
            reports.push(self.process_operator_catalog(operator).await);
        }
        Ok(reports)
    }

    /// SQL script an operator's catalogs would execute, without a database.
    pub fn render_operator(&self, operator: &str) -> String {
        discover(&self.config.operators_root, operator)
            .catalogs
            .into_iter()
            .map(|discovered| {
                let catalog =
                    normalize(discovered.definition, &self.families, &self.config).catalog;
                catalog_script(&catalog, &self.config)
            })
            .collect()
    }
}
