//! The seam between [`GraphStore`](crate::GraphStore) and a concrete backend.

use async_trait::async_trait;

use social_core::PersonSummary;

use crate::client::StoreError;
use crate::statements::Statement;

/// A graph backend able to run the five person statements.
///
/// Each call runs the statement inside its own transaction and commits
/// before returning. On failure the transaction is rolled back and the
/// session released before the error is returned.
#[async_trait]
pub trait GraphBackend: Send + Sync {
    /// Run a mutating statement, discarding any rows.
    async fn write(&self, statement: &Statement<'_>) -> Result<(), StoreError>;

    /// Run a read statement and collect its `(id, name)` rows.
    async fn read(&self, statement: &Statement<'_>) -> Result<Vec<PersonSummary>, StoreError>;
}
