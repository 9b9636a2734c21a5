//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("bot.nick is required")]
    MissingNick,
    #[error("bot.nick must not contain spaces, got '{0}'")]
    InvalidNick(String),
    #[error("bot.registration_timeout_secs must be greater than 0")]
    InvalidRegistrationTimeout,
    #[error("no endpoint configured (use [[endpoints]] or [server])")]
    NoEndpoints,
    #[error("endpoint {0} has port 0")]
    InvalidPort(String),
    #[error("modules.badwords.path is required")]
    MissingBadwordsPath,
    #[error("modules.badwords.kick_reason is required")]
    MissingKickReason,
    #[error("modules.actions.path is required")]
    MissingActionsPath,
    #[error("modules.quit.phrase is required")]
    MissingQuitPhrase,
    #[error("modules.announcer.interval_secs must be greater than 0")]
    InvalidAnnounceInterval,
    #[error("modules.announcer.lines must not be empty")]
    NoAnnounceLines,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Identity
    let nick = &config.bot.nick;
    if nick.trim().is_empty() {
        errors.push(ValidationError::MissingNick);
    } else if nick.contains(char::is_whitespace) {
        errors.push(ValidationError::InvalidNick(nick.clone()));
    }
    if config.bot.registration_timeout_secs == 0 {
        errors.push(ValidationError::InvalidRegistrationTimeout);
    }

    // Endpoints
    let endpoints = config.endpoint_list();
    if endpoints.is_empty() {
        errors.push(ValidationError::NoEndpoints);
    }
    for endpoint in endpoints.iter().filter(|e| e.port == 0) {
        errors.push(ValidationError::InvalidPort(endpoint.to_string()));
    }

    // Modules
    let modules = &config.modules;
    if let Some(ref badwords) = modules.badwords {
        if badwords.path.trim().is_empty() {
            errors.push(ValidationError::MissingBadwordsPath);
        }
        if badwords.kick_reason.trim().is_empty() {
            errors.push(ValidationError::MissingKickReason);
        }
    }
    if let Some(ref actions) = modules.actions
        && actions.path.trim().is_empty()
    {
        errors.push(ValidationError::MissingActionsPath);
    }
    if let Some(ref quit) = modules.quit
        && quit.phrase.trim().is_empty()
    {
        errors.push(ValidationError::MissingQuitPhrase);
    }
    if let Some(ref announcer) = modules.announcer {
        if announcer.interval_secs == 0 {
            errors.push(ValidationError::InvalidAnnounceInterval);
        }
        if announcer.lines.is_empty() {
            errors.push(ValidationError::NoAnnounceLines);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
