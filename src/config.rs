//! Configuration handling for the page behaviors

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Tunables for the page behaviors. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Height of the fixed header, subtracted from in-page scroll targets
    pub header_height: f64,
    /// Offset added to the scroll position when matching sections
    pub scroll_spy_offset: f64,
    /// Scroll distance after which the scroll-to-top control shows
    pub scroll_top_threshold: f64,
    /// Viewport width below which the navigation collapses
    pub nav_breakpoint: f64,
    /// Simulated submission latency
    pub form_submit_delay_ms: u64,
    /// Counter animation length
    pub count_up_duration_ms: u64,
    /// Counter animation tick, also the host frame interval
    pub count_up_tick_ms: u64,
    /// Lifetime of a notification banner
    pub notification_ttl_ms: u64,
    /// Duration of a smooth scroll
    pub smooth_scroll_ms: u64,
    /// Id of the contact form
    pub form_id: String,
    /// Where a successful submission navigates to
    pub confirmation_location: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            header_height: 72.0,
            scroll_spy_offset: 100.0,
            scroll_top_threshold: 300.0,
            nav_breakpoint: 768.0,
            form_submit_delay_ms: 800,
            count_up_duration_ms: 2000,
            count_up_tick_ms: 16,
            notification_ttl_ms: 4000,
            smooth_scroll_ms: 450,
            form_id: "contactForm".to_string(),
            confirmation_location: "thank_you.html".to_string(),
        }
    }
}

impl SiteConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("sk", "site-widgets", "site-widgets")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, falling back to defaults
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: SiteConfig = serde_json::from_str(&content)?;
                tracing::debug!("Loaded config from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.form_submit_delay_ms)
    }

    pub fn count_up_duration(&self) -> Duration {
        Duration::from_millis(self.count_up_duration_ms)
    }

    /// Tick interval, never zero
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.count_up_tick_ms.max(1))
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn smooth_scroll(&self) -> Duration {
        Duration::from_millis(self.smooth_scroll_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.header_height, 72.0);
        assert_eq!(config.scroll_spy_offset, 100.0);
        assert_eq!(config.scroll_top_threshold, 300.0);
        assert_eq!(config.submit_delay(), Duration::from_millis(800));
        assert_eq!(config.count_up_duration(), Duration::from_millis(2000));
        assert_eq!(config.tick(), Duration::from_millis(16));
        assert_eq!(config.notification_ttl(), Duration::from_secs(4));
        assert_eq!(config.form_id, "contactForm");
        assert_eq!(config.confirmation_location, "thank_you.html");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"form_submit_delay_ms": 50, "confirmation_location": "dakujeme.html"}"#;
        let parsed: SiteConfig = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.submit_delay(), Duration::from_millis(50));
        assert_eq!(parsed.confirmation_location, "dakujeme.html");
        assert_eq!(parsed.header_height, 72.0);
        assert_eq!(parsed.form_id, "contactForm");
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: SiteConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, SiteConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"header_height": 60.0, "unknown_field": "value"}"#;
        let parsed: SiteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.header_height, 60.0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = SiteConfig {
            nav_breakpoint: 992.0,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SiteConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_zero_tick_is_clamped() {
        let config = SiteConfig {
            count_up_tick_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.tick(), Duration::from_millis(1));
    }

    #[test]
    fn test_load_returns_ok_without_file() {
        // Either the user's file or defaults, both parse
        assert!(SiteConfig::load().is_ok());
    }
}
