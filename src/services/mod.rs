//! External collaborators
//!
//! Interfaces to services the highlighter consumes but does not implement.

pub mod semantic;
