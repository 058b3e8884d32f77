//! Session and superadmin bootstrap configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration.
///
/// Covers the session cookie issued at login/signup and the optional
/// superadmin bootstrap credentials consumed by operator tooling.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Name of the session cookie
    #[serde(default = "default_session_cookie_name")]
    pub session_cookie_name: String,

    /// Session lifetime in days, set at creation
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: u32,

    /// Superadmin bootstrap email (operator tooling only)
    pub superadmin_email: Option<String>,

    /// Superadmin bootstrap password (operator tooling only)
    pub superadmin_password: Option<String>,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_cookie_name.is_empty() {
            return Err(ValidationError::MissingRequired("SESSION_COOKIE_NAME"));
        }
        if self.session_ttl_days == 0 || self.session_ttl_days > 365 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        // Bootstrap credentials must come as a pair or not at all.
        if self.superadmin_email.is_some() != self.superadmin_password.is_some() {
            return Err(ValidationError::IncompleteSuperadminBootstrap);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: default_session_cookie_name(),
            session_ttl_days: default_session_ttl_days(),
            superadmin_email: None,
            superadmin_password: None,
        }
    }
}

fn default_session_cookie_name() -> String {
    "sportcamp_session".to_string()
}

fn default_session_ttl_days() -> u32 {
    14
}
