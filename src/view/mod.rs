//! View layer
//!
//! Everything between a finalized match set and what the host draws: the
//! per-document highlight state, the classification colors, the projection
//! into style ranges and markers, and the overview bar.

pub mod highlight_session;
pub mod overview_bar;
pub mod render_projection;
pub mod symbol_colors;
