//! Highlight every occurrence of the symbol under the cursor
//!
//! Occurrences are found textually first and then narrowed to the ones that
//! resolve to the same binding whenever a semantic resolver is available for
//! the document. The result is projected into inline style ranges, gutter line
//! markers and overview bar entries that the host editor renders.
//!
//! The crate is driven by a host editor through [`app::HighlightController`]:
//! the host forwards its events ([`hooks::HostEvent`]) and calls
//! [`app::HighlightController::tick`] periodically, passing the active
//! [`plugin_api::EditorView`].

pub mod app;
pub mod config;
pub mod hooks;
pub mod model;
pub mod plugin_api;
pub mod primitives;
pub mod services;
pub mod view;

pub use app::HighlightController;
pub use config::Config;
pub use hooks::HostEvent;
pub use model::occurrence::Match;
pub use model::symbol::SymbolRef;
pub use plugin_api::EditorView;
pub use services::semantic::SymbolResolver;
