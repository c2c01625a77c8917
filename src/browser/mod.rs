//! Browser capabilities used by the page behaviors

mod terminal;
mod traits;

pub use terminal::TerminalBrowser;
pub use traits::Browser;

#[cfg(test)]
pub use traits::MockBrowser;
