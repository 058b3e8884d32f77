//! Application-wide billing settings (singleton row).

use rust_decimal::Decimal;

/// The fee configuration. Either fee may be unset, in which case the
/// corresponding billing phase refuses to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppSettings {
    pub registration_fee: Option<Decimal>,
    pub monthly_fee: Option<Decimal>,
}
