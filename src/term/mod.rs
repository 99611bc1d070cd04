//! Terminal presentation: pure snapshot-to-glyph composition plus the
//! crossterm-backed renderer that flushes it.

pub mod renderer;
pub mod view;

pub use renderer::TerminalRenderer;
pub use view::{compose, Frame, Glyph};
