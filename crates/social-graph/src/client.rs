//! Neo4j connection management and the production backend.

use async_trait::async_trait;
use neo4rs::{query, ConfigBuilder, Graph, Row, Txn};

use social_core::{PersonId, PersonSummary, StoreConfig};

use crate::backend::GraphBackend;
use crate::statements::Statement;

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend unreachable, address invalid, or credentials rejected.
    #[error("Neo4j connection error: {0}")]
    Connectivity(String),

    /// The backend rejected a statement.
    #[error("Neo4j query error: {0}")]
    Query(neo4rs::Error),

    /// A returned row did not carry the expected projection.
    #[error("Failed to decode row: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }
}

impl From<neo4rs::Error> for StoreError {
    fn from(e: neo4rs::Error) -> Self {
        match e {
            neo4rs::Error::IOError { .. }
            | neo4rs::Error::ConnectionError
            | neo4rs::Error::AuthenticationError(_)
            | neo4rs::Error::UrlParseError(_)
            | neo4rs::Error::UnsupportedScheme(_) => Self::Connectivity(e.to_string()),
            other => Self::Query(other),
        }
    }
}

/// Pooled Neo4j backend.
///
/// Holds the one long-lived connection handle. Clone is cheap (inner Arc);
/// dropping the last clone closes the pool.
#[derive(Clone)]
pub struct Neo4jBackend {
    graph: Graph,
}

impl Neo4jBackend {
    /// Connect to Neo4j and verify the server answers with the given
    /// credentials.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut builder = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size);
        if let Some(db) = &config.database {
            builder = builder.db(db.as_str());
        }
        let neo_config = builder
            .build()
            .map_err(|e| StoreError::Connectivity(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| StoreError::Connectivity(e.to_string()))?;

        // The pool connects lazily; force one round trip so bad addresses and
        // rejected credentials surface here rather than on the first operation.
        graph
            .run(query("RETURN 1"))
            .await
            .map_err(|e| StoreError::Connectivity(e.to_string()))?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Get a reference to the underlying neo4rs Graph for direct operations.
    pub fn inner(&self) -> &Graph {
        &self.graph
    }
}

#[async_trait]
impl GraphBackend for Neo4jBackend {
    async fn write(&self, statement: &Statement<'_>) -> Result<(), StoreError> {
        let mut txn = self.graph.start_txn().await?;

        if let Err(e) = txn.run(statement.to_query()).await {
            rollback(txn, statement).await;
            return Err(e.into());
        }

        txn.commit().await?;
        tracing::debug!(statement = statement.name(), "Committed write");
        Ok(())
    }

    async fn read(&self, statement: &Statement<'_>) -> Result<Vec<PersonSummary>, StoreError> {
        let mut txn = self.graph.start_txn().await?;

        match collect_rows(&mut txn, statement).await {
            Ok(people) => {
                txn.commit().await?;
                tracing::debug!(statement = statement.name(), rows = people.len(), "Read rows");
                Ok(people)
            }
            Err(e) => {
                rollback(txn, statement).await;
                Err(e)
            }
        }
    }
}

async fn collect_rows(
    txn: &mut Txn,
    statement: &Statement<'_>,
) -> Result<Vec<PersonSummary>, StoreError> {
    let mut stream = txn.execute(statement.to_query()).await?;
    let mut people = Vec::new();
    while let Some(row) = stream.next(txn.handle()).await? {
        people.push(row_to_summary(&row)?);
    }
    Ok(people)
}

/// Roll back after a failed statement. The original error is what the caller
/// sees, so a rollback failure is only logged.
async fn rollback(txn: Txn, statement: &Statement<'_>) {
    if let Err(e) = txn.rollback().await {
        tracing::warn!(statement = statement.name(), error = %e, "Rollback failed");
    } else {
        tracing::warn!(statement = statement.name(), "Rolled back");
    }
}

fn row_to_summary(row: &Row) -> Result<PersonSummary, StoreError> {
    let id: i64 = row
        .get("id")
        .map_err(|e| StoreError::Decode(format!("missing id: {e}")))?;
    let name: String = row
        .get("name")
        .map_err(|e| StoreError::Decode(format!("missing name for node {id}: {e}")))?;
    Ok(PersonSummary::new(PersonId(id), name))
}
