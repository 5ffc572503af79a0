//! In-process backend with the same observable semantics as Neo4j.
//!
//! Ids are handed out from 0 upward and freed ids are reused, lowest first,
//! mirroring Neo4j's internal id reuse. Friendships are stored directed and
//! read in both directions; parallel edges are reported once per edge.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use social_core::{NewPerson, PersonId, PersonSummary};

use crate::backend::GraphBackend;
use crate::client::StoreError;
use crate::statements::Statement;

#[derive(Debug, Default)]
struct MemoryGraph {
    next_id: i64,
    free_ids: BTreeSet<i64>,
    people: BTreeMap<i64, NewPerson>,
    /// Directed (source, target) pairs.
    friendships: Vec<(i64, i64)>,
}

impl MemoryGraph {
    fn allocate_id(&mut self) -> i64 {
        if let Some(id) = self.free_ids.pop_first() {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn summary(&self, id: i64) -> Option<PersonSummary> {
        self.people
            .get(&id)
            .map(|p| PersonSummary::new(PersonId(id), p.name.clone()))
    }

    fn execute(&mut self, statement: &Statement<'_>) -> Vec<PersonSummary> {
        match *statement {
            Statement::CreatePerson(person) => {
                let id = self.allocate_id();
                self.people.insert(id, person.clone());
                Vec::new()
            }
            Statement::ListPeople => self
                .people
                .iter()
                .map(|(id, p)| PersonSummary::new(PersonId(*id), p.name.clone()))
                .collect(),
            Statement::AddFriendship { from, to } => {
                if self.people.contains_key(&from.0) && self.people.contains_key(&to.0) {
                    self.friendships.push((from.0, to.0));
                }
                Vec::new()
            }
            Statement::FriendsOf(id) => {
                if !self.people.contains_key(&id.0) {
                    return Vec::new();
                }
                self.friendships
                    .iter()
                    .filter_map(|&(source, target)| {
                        if source == id.0 {
                            self.summary(target)
                        } else if target == id.0 {
                            self.summary(source)
                        } else {
                            None
                        }
                    })
                    .collect()
            }
            Statement::RemovePerson(id) => {
                if self.people.remove(&id.0).is_some() {
                    self.friendships
                        .retain(|&(source, target)| source != id.0 && target != id.0);
                    self.free_ids.insert(id.0);
                }
                Vec::new()
            }
        }
    }
}

/// Substitute backend for tests and for running without a server.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    graph: Mutex<MemoryGraph>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored attributes of a person, if the id resolves.
    pub fn person(&self, id: PersonId) -> Option<NewPerson> {
        self.lock().people.get(&id.0).cloned()
    }

    /// Number of stored FRIEND_OF edges, counting parallel edges separately.
    pub fn friendship_count(&self) -> usize {
        self.lock().friendships.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryGraph> {
        self.graph.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl GraphBackend for MemoryBackend {
    async fn write(&self, statement: &Statement<'_>) -> Result<(), StoreError> {
        self.lock().execute(statement);
        tracing::debug!(statement = statement.name(), "Applied write in memory");
        Ok(())
    }

    async fn read(&self, statement: &Statement<'_>) -> Result<Vec<PersonSummary>, StoreError> {
        let people = self.lock().execute(statement);
        tracing::debug!(statement = statement.name(), rows = people.len(), "Read rows in memory");
        Ok(people)
    }
}
