//! Core domain types for the social graph.
//!
//! A `Person` node carries a name, an age and a location. Its identity is
//! assigned by the backend and only meaningful while the node exists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SocialError;

// ── Identity ──────────────────────────────────────────────────────

/// Backend-assigned identifier of a Person node.
///
/// Stable for the node's lifetime. The backend may hand the same value to a
/// new node after deletion, so ids must not be cached across removals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(pub i64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PersonId {
    type Err = SocialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(PersonId)
            .map_err(|_| SocialError::InvalidInput(format!("not a person id: {s:?}")))
    }
}

// ── Person ────────────────────────────────────────────────────────

/// Attributes of a person about to be created. All fields are required;
/// `age` is passed through unchecked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub age: i64,
    pub location: String,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, age: i64, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            location: location.into(),
        }
    }
}

/// The `(id, name)` projection returned by list and network reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PersonSummary {
    pub id: PersonId,
    pub name: String,
}

impl PersonSummary {
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for PersonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID: {}, Name: {}", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_id_parse() {
        assert_eq!("42".parse::<PersonId>().unwrap(), PersonId(42));
        assert_eq!(" 7 \n".parse::<PersonId>().unwrap(), PersonId(7));
        assert!("seven".parse::<PersonId>().is_err());
        assert!("".parse::<PersonId>().is_err());
    }

    #[test]
    fn test_summary_display() {
        let s = PersonSummary::new(PersonId(2), "Bruno");
        assert_eq!(s.to_string(), "ID: 2, Name: Bruno");
    }
}
