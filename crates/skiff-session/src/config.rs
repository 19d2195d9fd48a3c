//! Session configuration.

use serde::Deserialize;
use skiff_types::error::Result;

/// Session-level configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// URL loaded into a newly created tab.
    pub home_url: String,
    /// Budget (in MB) an external cache checks document sizes against.
    pub max_cache_mb: usize,
    /// Left margin width the renderer applies. Horizontal scroll columns
    /// include it, so the session records it alongside the terminal size.
    pub left_margin: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            home_url: "about:newtab".to_string(),
            max_cache_mb: 2,
            left_margin: 2,
        }
    }
}

impl SessionConfig {
    /// Parse a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Cache size in bytes.
    pub fn cache_size_bytes(&self) -> usize {
        self.max_cache_mb * 1024 * 1024
    }
}
