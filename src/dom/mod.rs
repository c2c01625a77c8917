//! Page document model shared by every behavior

mod document;
mod element;
pub mod style;
mod viewport;

pub use document::{Document, SCROLL_LOCK_CLASS};
pub use element::{Element, LayoutBox, NodeId};
pub use viewport::{ScrollBehavior, Viewport};
