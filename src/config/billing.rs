//! Billing schedule configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Billing and notification scheduling configuration.
///
/// The schedule expressions and time zone are consumed by deployment glue
/// (external cron), not by request handlers; they are validated here so a
/// misconfigured deployment fails at startup rather than at 2am.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Cron expression for the monthly billing run
    #[serde(default = "default_billing_schedule")]
    pub schedule: String,

    /// IANA time zone the schedule is evaluated in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Look-ahead window for session reminder notifications, in hours
    #[serde(default = "default_notify_window_hours")]
    pub notify_window_hours: u32,
}

impl BillingConfig {
    /// Validate billing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.schedule.is_empty() {
            return Err(ValidationError::MissingRequired("BILLING_SCHEDULE"));
        }
        if self.timezone.is_empty() {
            return Err(ValidationError::MissingRequired("BILLING_TIMEZONE"));
        }
        if self.notify_window_hours == 0 || self.notify_window_hours > 168 {
            return Err(ValidationError::InvalidNotifyWindow);
        }
        Ok(())
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            schedule: default_billing_schedule(),
            timezone: default_timezone(),
            notify_window_hours: default_notify_window_hours(),
        }
    }
}

fn default_billing_schedule() -> String {
    // First day of each month at 02:00
    "0 2 1 * *".to_string()
}

fn default_timezone() -> String {
    "Asia/Kuala_Lumpur".to_string()
}

fn default_notify_window_hours() -> u32 {
    24
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_defaults() {
        let config = BillingConfig::default();
        assert_eq!(config.schedule, "0 2 1 * *");
        assert_eq!(config.notify_window_hours, 24);
    }

    #[test]
    fn test_validation_empty_schedule() {
        let config = BillingConfig {
            schedule: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_notify_window_bounds() {
        let config = BillingConfig {
            notify_window_hours: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BillingConfig {
            notify_window_hours: 200,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
