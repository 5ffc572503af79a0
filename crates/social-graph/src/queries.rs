//! Read operations for the person graph.

use social_core::{PersonId, PersonSummary};

use crate::backend::GraphBackend;
use crate::client::StoreError;
use crate::statements::Statement;
use crate::store::GraphStore;

impl<B: GraphBackend> GraphStore<B> {
    /// Every person in the store. Order is backend-defined.
    pub async fn list_people(&self) -> Result<Vec<PersonSummary>, StoreError> {
        self.read(&Statement::ListPeople).await
    }

    /// Direct friends of `id`, following `FRIEND_OF` edges in both
    /// directions. An unknown id yields an empty list.
    pub async fn view_friends_network(
        &self,
        id: PersonId,
    ) -> Result<Vec<PersonSummary>, StoreError> {
        self.read(&Statement::FriendsOf(id)).await
    }
}
