//! social-cli: interactive menu over the social graph store.
//!
//! The shell owns no state of its own. Each menu choice reads its fields,
//! makes one store call and prints the result.

pub mod shell;
