//! Page widgets
//!
//! Independent behaviors, each bound to its own region of the document.
//! `bind` returns `None` when a widget's anchors are missing from the page.

mod accordion;
mod count_up;
mod modal;
mod nav_toggle;
mod scroll_spy;
mod scroll_top;
mod smooth_scroll;

pub use accordion::{Accordion, AccordionItem};
pub use count_up::{format_sk, CountFrame, CountTiming, CountUp, Counter, CounterPhase, COUNT_ATTR};
pub use modal::{Modal, MODAL_ATTR, MODAL_CLOSE_ATTR};
pub use nav_toggle::NavToggle;
pub use scroll_spy::ScrollSpy;
pub use scroll_top::ScrollToTop;
pub use smooth_scroll::SmoothScroll;
