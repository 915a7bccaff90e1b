//! Core data model
//!
//! Pure data types shared by the primitives, the session and the renderer.

pub mod event;
pub mod occurrence;
pub mod symbol;
