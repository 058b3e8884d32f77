use serde::{Deserialize, Serialize};

use crate::ports::TrendRow;

pub const DEFAULT_DAYS: i64 = 30;
pub const MIN_DAYS: i64 = 7;
pub const MAX_DAYS: i64 = 365;

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    #[serde(default)]
    pub days: Option<i64>,
}

impl WindowQuery {
    pub fn clamped_days(&self) -> i64 {
        self.days.unwrap_or(DEFAULT_DAYS).clamp(MIN_DAYS, MAX_DAYS)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsResponse {
    pub days: i64,
    pub by_sport: Vec<TrendRow>,
    pub by_coach: Vec<TrendRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults_and_clamps() {
        assert_eq!(WindowQuery { days: None }.clamped_days(), 30);
        assert_eq!(WindowQuery { days: Some(1) }.clamped_days(), 7);
        assert_eq!(WindowQuery { days: Some(90) }.clamped_days(), 90);
        assert_eq!(WindowQuery { days: Some(9999) }.clamped_days(), 365);
    }
}
