//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

// =============================================================================
// Bot Defaults
// =============================================================================

pub fn default_realname() -> String {
    "Straylight modular bot".to_string()
}

pub fn default_help_trigger() -> Option<String> {
    Some("help".to_string())
}

pub fn default_retry_delay_ms() -> u64 {
    2000
}

pub fn default_registration_timeout() -> u64 {
    60
}

// =============================================================================
// Module Defaults
// =============================================================================

pub fn default_uptime_trigger() -> String {
    "uptime".to_string()
}

pub fn default_quit_phrase() -> String {
    "quit".to_string()
}

pub fn default_quit_message() -> String {
    "Bye".to_string()
}

pub fn default_announce_interval() -> u64 {
    3600
}

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}
