//! The person graph store and its lifecycle.

use social_core::{PersonSummary, StoreConfig};

use crate::backend::GraphBackend;
use crate::client::{Neo4jBackend, StoreError};
use crate::memory::MemoryBackend;
use crate::statements::Statement;

/// Person and friendship store over an injected backend.
///
/// The store owns its backend for its whole lifetime. Operations live in
/// [`mutations`](crate::mutations) and [`queries`](crate::queries).
pub struct GraphStore<B> {
    pub(crate) backend: B,
}

impl<B: GraphBackend> GraphStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub(crate) async fn write(&self, statement: &Statement<'_>) -> Result<(), StoreError> {
        debug_assert!(statement.is_write(), "{} is not a write", statement.name());
        self.backend.write(statement).await
    }

    pub(crate) async fn read(
        &self,
        statement: &Statement<'_>,
    ) -> Result<Vec<PersonSummary>, StoreError> {
        debug_assert!(!statement.is_write(), "{} is not a read", statement.name());
        self.backend.read(statement).await
    }

    /// Release the backend. Consuming `self` makes a second release
    /// impossible.
    pub fn close(self) {
        drop(self.backend);
        tracing::info!("Graph store closed");
    }
}

impl GraphStore<Neo4jBackend> {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        Ok(Self::new(Neo4jBackend::connect(config).await?))
    }
}

impl GraphStore<MemoryBackend> {
    pub fn in_memory() -> Self {
        tracing::info!("Using in-memory graph backend");
        Self::new(MemoryBackend::new())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use social_core::{NewPerson, PersonId};

    use super::*;

    /// Records the statements it is handed, one entry per transaction.
    #[derive(Default)]
    struct RecordingBackend {
        log: Mutex<Vec<(&'static str, bool)>>,
    }

    impl RecordingBackend {
        fn take(&self) -> Vec<(&'static str, bool)> {
            std::mem::take(&mut *self.log.lock().unwrap())
        }
    }

    #[async_trait]
    impl GraphBackend for RecordingBackend {
        async fn write(&self, statement: &Statement<'_>) -> Result<(), StoreError> {
            self.log.lock().unwrap().push((statement.name(), true));
            Ok(())
        }

        async fn read(
            &self,
            statement: &Statement<'_>,
        ) -> Result<Vec<PersonSummary>, StoreError> {
            self.log.lock().unwrap().push((statement.name(), false));
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_each_operation_is_one_transaction() {
        let store = GraphStore::new(RecordingBackend::default());

        store
            .create_person(&NewPerson::new("Ana", 30, "Lisbon"))
            .await
            .unwrap();
        assert_eq!(store.backend().take(), vec![("create_person", true)]);

        store.list_people().await.unwrap();
        assert_eq!(store.backend().take(), vec![("list_people", false)]);

        store
            .add_friendship(PersonId(0), PersonId(1))
            .await
            .unwrap();
        assert_eq!(store.backend().take(), vec![("add_friendship", true)]);

        store.view_friends_network(PersonId(0)).await.unwrap();
        assert_eq!(store.backend().take(), vec![("friends_of", false)]);

        store.remove_person(PersonId(0)).await.unwrap();
        assert_eq!(store.backend().take(), vec![("remove_person", true)]);
    }

    #[tokio::test]
    #[should_panic(expected = "list_people is not a write")]
    async fn test_read_statement_rejected_on_write_path() {
        let store = GraphStore::new(RecordingBackend::default());
        let _ = store.write(&Statement::ListPeople).await;
    }

    struct UnreachableBackend;

    #[async_trait]
    impl GraphBackend for UnreachableBackend {
        async fn write(&self, _: &Statement<'_>) -> Result<(), StoreError> {
            Err(StoreError::Connectivity("connection refused".into()))
        }

        async fn read(&self, _: &Statement<'_>) -> Result<Vec<PersonSummary>, StoreError> {
            Err(StoreError::Connectivity("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_backend_errors_propagate() {
        let store = GraphStore::new(UnreachableBackend);
        let err = store
            .create_person(&NewPerson::new("Ana", 30, "Lisbon"))
            .await
            .unwrap_err();
        assert!(err.is_connectivity());
        assert!(store.list_people().await.unwrap_err().is_connectivity());
        assert!(store.remove_person(PersonId(1)).await.is_err());
    }
}
