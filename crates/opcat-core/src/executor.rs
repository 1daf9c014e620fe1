//! Statement batch execution against PostgreSQL.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgConnectOptions, PgConnection};
use sqlx::query::Query;
use sqlx::{Connection, Postgres};

use crate::config::DbConfig;
use crate::error::ExecError;
use crate::statement::{Batch, SqlValue, Statement};

/// Runs statement batches as single units of work.
#[async_trait]
pub trait BatchExecutor: Send + Sync {
    /// Execute every statement of the batch, all or nothing.
    async fn execute(&self, batch: &Batch) -> Result<(), ExecError>;
}

/// Executor opening a fresh connection per batch.
///
/// Each batch runs in its own transaction; the connection is closed before
/// `execute` returns, whatever the outcome.
#[derive(Debug, Clone)]
pub struct PgExecutor {
    options: PgConnectOptions,
}

impl PgExecutor {
    pub fn new(options: PgConnectOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &DbConfig) -> Self {
        Self::new(config.connect_options())
    }

    async fn run(conn: &mut PgConnection, batch: &Batch) -> Result<(), ExecError> {
        let mut tx = conn.begin().await.map_err(ExecError::Begin)?;

        for (index, statement) in batch.statements.iter().enumerate() {
            bind_all(statement)
                .execute(&mut *tx)
                .await
                .map_err(|source| ExecError::Statement { index, source })?;
        }

        tx.commit().await.map_err(ExecError::Commit)
    }
}

fn bind_all(statement: &Statement) -> Query<'_, Postgres, PgArguments> {
    statement
        .params
        .iter()
        .fold(sqlx::query(statement.sql), |query, value| match value {
            SqlValue::Null => query.bind(None::<String>),
            SqlValue::Text(text) => query.bind(text.clone()),
            SqlValue::Int(n) => query.bind(*n),
            SqlValue::Bool(b) => query.bind(*b),
        })
}

#[async_trait]
impl BatchExecutor for PgExecutor {
    async fn execute(&self, batch: &Batch) -> Result<(), ExecError> {
        let mut conn = PgConnection::connect_with(&self.options)
            .await
            .map_err(ExecError::Connect)?;

        let result = Self::run(&mut conn, batch).await;

        if let Err(e) = conn.close().await {
            tracing::debug!(batch = %batch.label, error = %e, "connection close failed");
        }

        match &result {
            Ok(()) => {
                tracing::debug!(batch = %batch.label, statements = batch.statements.len(), "batch committed")
            }
            Err(e) => tracing::error!(batch = %batch.label, error = %e, "batch failed"),
        }

        result
    }
}
