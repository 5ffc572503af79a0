//! The five Cypher templates that make up the wire contract with Neo4j.
//!
//! Templates are fixed strings. Caller-supplied values only ever reach the
//! backend as bound parameters.

use neo4rs::{query, Query};

use social_core::{NewPerson, PersonId};

/// Insert one Person node.
pub const CREATE_PERSON: &str =
    "CREATE (p:Person {name: $name, age: $age, location: $location})";

/// Every Person node, projected to `(id, name)`.
pub const LIST_PEOPLE: &str = "MATCH (p:Person) RETURN ID(p) AS id, p.name AS name";

/// Match both endpoints, then create one directed edge. Creates nothing when
/// either id does not resolve.
pub const ADD_FRIENDSHIP: &str = "MATCH (p1:Person), (p2:Person) \
     WHERE ID(p1) = $person_id1 AND ID(p2) = $person_id2 \
     CREATE (p1)-[:FRIEND_OF]->(p2)";

/// Neighbors over one FRIEND_OF edge in either direction.
pub const FRIENDS_OF: &str = "MATCH (p:Person)-[:FRIEND_OF]-(friend) \
     WHERE ID(p) = $person_id \
     RETURN ID(friend) AS id, friend.name AS name";

/// Delete a Person node together with every incident edge.
pub const REMOVE_PERSON: &str = "MATCH (p:Person) WHERE ID(p) = $person_id DETACH DELETE p";

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param<'a> {
    Int(i64),
    Text(&'a str),
}

/// One of the five statements, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    CreatePerson(&'a NewPerson),
    ListPeople,
    AddFriendship { from: PersonId, to: PersonId },
    FriendsOf(PersonId),
    RemovePerson(PersonId),
}

impl<'a> Statement<'a> {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreatePerson(_) => "create_person",
            Self::ListPeople => "list_people",
            Self::AddFriendship { .. } => "add_friendship",
            Self::FriendsOf(_) => "friends_of",
            Self::RemovePerson(_) => "remove_person",
        }
    }

    pub fn cypher(&self) -> &'static str {
        match self {
            Self::CreatePerson(_) => CREATE_PERSON,
            Self::ListPeople => LIST_PEOPLE,
            Self::AddFriendship { .. } => ADD_FRIENDSHIP,
            Self::FriendsOf(_) => FRIENDS_OF,
            Self::RemovePerson(_) => REMOVE_PERSON,
        }
    }

    /// Whether the statement mutates the graph.
    pub fn is_write(&self) -> bool {
        !matches!(self, Self::ListPeople | Self::FriendsOf(_))
    }

    /// Parameter bindings, keyed by the `$name` used in the template.
    pub fn params(&self) -> Vec<(&'static str, Param<'a>)> {
        match *self {
            Self::CreatePerson(p) => vec![
                ("name", Param::Text(&p.name)),
                ("age", Param::Int(p.age)),
                ("location", Param::Text(&p.location)),
            ],
            Self::ListPeople => Vec::new(),
            Self::AddFriendship { from, to } => vec![
                ("person_id1", Param::Int(from.0)),
                ("person_id2", Param::Int(to.0)),
            ],
            Self::FriendsOf(id) | Self::RemovePerson(id) => {
                vec![("person_id", Param::Int(id.0))]
            }
        }
    }

    /// Build the neo4rs query with all parameters bound.
    pub fn to_query(&self) -> Query {
        self.params()
            .into_iter()
            .fold(query(self.cypher()), |q, (key, value)| match value {
                Param::Int(v) => q.param(key, v),
                Param::Text(v) => q.param(key, v.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every `$param` a template references must be bound, and nothing else.
    fn assert_params_match_template(stmt: &Statement<'_>) {
        let cypher = stmt.cypher();
        let params = stmt.params();
        for (key, _) in &params {
            assert!(
                cypher.contains(&format!("${key}")),
                "{} binds ${key} which the template never uses",
                stmt.name()
            );
        }
        let referenced = cypher.matches('$').count();
        assert_eq!(referenced, params.len(), "{}", stmt.name());
    }

    #[test]
    fn test_templates_bind_exactly_their_params() {
        let ana = NewPerson::new("Ana", 30, "Lisbon");
        for stmt in [
            Statement::CreatePerson(&ana),
            Statement::ListPeople,
            Statement::AddFriendship {
                from: PersonId(1),
                to: PersonId(2),
            },
            Statement::FriendsOf(PersonId(1)),
            Statement::RemovePerson(PersonId(1)),
        ] {
            assert_params_match_template(&stmt);
        }
    }

    #[test]
    fn test_create_person_params() {
        let ana = NewPerson::new("Ana", 30, "Lisbon");
        let stmt = Statement::CreatePerson(&ana);
        assert!(stmt.is_write());
        assert_eq!(
            stmt.params(),
            vec![
                ("name", Param::Text("Ana")),
                ("age", Param::Int(30)),
                ("location", Param::Text("Lisbon")),
            ]
        );
    }

    #[test]
    fn test_friendship_is_written_in_one_direction() {
        let stmt = Statement::AddFriendship {
            from: PersonId(4),
            to: PersonId(9),
        };
        assert!(stmt.cypher().contains("(p1)-[:FRIEND_OF]->(p2)"));
        assert_eq!(
            stmt.params(),
            vec![("person_id1", Param::Int(4)), ("person_id2", Param::Int(9))]
        );
    }

    #[test]
    fn test_friends_are_read_in_both_directions() {
        let stmt = Statement::FriendsOf(PersonId(3));
        assert!(!stmt.is_write());
        assert!(stmt.cypher().contains("(p:Person)-[:FRIEND_OF]-(friend)"));
        assert!(!stmt.cypher().contains("->"));
    }

    #[test]
    fn test_remove_detaches() {
        let stmt = Statement::RemovePerson(PersonId(3));
        assert!(stmt.is_write());
        assert!(stmt.cypher().ends_with("DETACH DELETE p"));
    }

    #[test]
    fn test_read_projections() {
        for stmt in [Statement::ListPeople, Statement::FriendsOf(PersonId(0))] {
            assert!(stmt.cypher().contains("AS id"), "{}", stmt.name());
            assert!(stmt.cypher().contains("AS name"), "{}", stmt.name());
        }
    }
}
