//! Write operations for the person graph.
//!
//! Friendship creation and removal keep Neo4j's match-then-act behavior: an
//! id that does not resolve to a Person makes the call a silent no-op.

use social_core::{NewPerson, PersonId};

use crate::backend::GraphBackend;
use crate::client::StoreError;
use crate::statements::Statement;
use crate::store::GraphStore;

impl<B: GraphBackend> GraphStore<B> {
    /// Insert one Person node. `age` is not range-checked.
    pub async fn create_person(&self, person: &NewPerson) -> Result<(), StoreError> {
        self.write(&Statement::CreatePerson(person)).await?;
        tracing::debug!(name = %person.name, "Created person");
        Ok(())
    }

    /// Create one `FRIEND_OF` edge from `from` to `to`.
    ///
    /// Self-loops are allowed and repeated calls create parallel edges.
    pub async fn add_friendship(&self, from: PersonId, to: PersonId) -> Result<(), StoreError> {
        self.write(&Statement::AddFriendship { from, to }).await?;
        tracing::debug!(%from, %to, "Added friendship");
        Ok(())
    }

    /// Delete a person and every edge touching it.
    pub async fn remove_person(&self, id: PersonId) -> Result<(), StoreError> {
        self.write(&Statement::RemovePerson(id)).await?;
        tracing::debug!(%id, "Removed person");
        Ok(())
    }
}
