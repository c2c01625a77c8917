//! Trait abstraction for the hosting browser to enable mocking in tests

/// The two browser capabilities the page behaviors consult directly
#[cfg_attr(test, mockall::automock)]
pub trait Browser {
    /// Connectivity signal (`navigator.onLine`)
    fn is_online(&self) -> bool;

    /// Leave the page for `location`
    fn navigate(&mut self, location: &str);
}
