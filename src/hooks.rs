//! Host events the highlighter reacts to
//!
//! The host translates its own notifications into [`HostEvent`]s and hands
//! them to [`crate::app::HighlightController::handle_event`] together with the
//! view they concern.

use crate::config::Config;
use crate::model::event::{BufferEdit, BufferId};

/// Notifications forwarded by the host editor
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// Another document view became active
    DocumentSwitched,

    /// The active document was written to disk
    DocumentSaved,

    /// A document view was closed; its highlight state is dropped
    DocumentClosed { buffer_id: BufferId },

    /// Text in the active document changed
    BufferModified(BufferEdit),

    /// The user double-clicked, selecting `selection`
    DoubleClick { selection: String },

    /// Settings were edited; the new values replace the current ones
    SettingsChanged(Box<Config>),
}

impl HostEvent {
    /// Short name for log output
    pub fn name(&self) -> &'static str {
        match self {
            Self::DocumentSwitched => "document_switched",
            Self::DocumentSaved => "document_saved",
            Self::DocumentClosed { .. } => "document_closed",
            Self::BufferModified(_) => "buffer_modified",
            Self::DoubleClick { .. } => "double_click",
            Self::SettingsChanged(_) => "settings_changed",
        }
    }
}
