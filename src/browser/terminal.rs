//! Browser implementation backing the terminal preview

use super::Browser;

/// Simulated browser: connectivity is a switch, navigation records the target
#[derive(Debug, Clone)]
pub struct TerminalBrowser {
    online: bool,
    location: Option<String>,
}

impl TerminalBrowser {
    pub fn new() -> Self {
        Self {
            online: true,
            location: None,
        }
    }

    /// Flip the simulated connectivity, returning the new state
    pub fn toggle_online(&mut self) -> bool {
        self.online = !self.online;
        tracing::info!(online = self.online, "Connectivity switched");
        self.online
    }

    /// Location the page navigated to, if any
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl Default for TerminalBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl Browser for TerminalBrowser {
    fn is_online(&self) -> bool {
        self.online
    }

    fn navigate(&mut self, location: &str) {
        tracing::info!("Navigating to {location}");
        self.location = Some(location.to_string());
    }
}
