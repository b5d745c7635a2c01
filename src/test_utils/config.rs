//! Configuration utilities for testing.

use crate::config::{parse_options, Options, PortalConfig};

/// Creates a portal configuration pointing at `url`.
pub fn test_portal_config(url: &str) -> PortalConfig {
    PortalConfig {
        url: url.to_string(),
        username: "user@example.com".to_string(),
        password: "secret".to_string(),
    }
}

/// Parses an options document, panicking on malformed test input.
pub fn options_from_json(json: &str) -> Options {
    parse_options(json).expect("Invalid test options")
}
