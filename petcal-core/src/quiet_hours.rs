//! Do-not-notify window.
//!
//! The store only records the window. Suppressing notifications inside it is
//! up to whoever schedules them.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{PetcalError, PetcalResult};

pub const DEFAULT_QUIET_START_HOUR: u8 = 22;
pub const DEFAULT_QUIET_END_HOUR: u8 = 8;

/// Quiet hours as a half-open `[start_hour, end_hour)` window.
///
/// `start_hour > end_hour` wraps past midnight. `start_hour == end_hour` is
/// an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawQuietHours")]
pub struct QuietHours {
    start_hour: u8,
    end_hour: u8,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuietHours {
    start_hour: i64,
    end_hour: i64,
}

impl TryFrom<RawQuietHours> for QuietHours {
    type Error = PetcalError;

    fn try_from(raw: RawQuietHours) -> Result<Self, Self::Error> {
        let start = hour_from(raw.start_hour)?;
        let end = hour_from(raw.end_hour)?;
        QuietHours::new(start, end)
    }
}

fn hour_from(value: i64) -> PetcalResult<u8> {
    u8::try_from(value)
        .map_err(|_| PetcalError::InvalidQuietHours(format!("hour {value} is out of range 0-23")))
}

impl QuietHours {
    pub fn new(start_hour: u8, end_hour: u8) -> PetcalResult<Self> {
        for hour in [start_hour, end_hour] {
            if hour > 23 {
                return Err(PetcalError::InvalidQuietHours(format!(
                    "hour {hour} is out of range 0-23"
                )));
            }
        }

        Ok(QuietHours {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    pub fn is_empty(&self) -> bool {
        self.start_hour == self.end_hour
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        let start = u32::from(self.start_hour);
        let end = u32::from(self.end_hour);

        if start <= end {
            hour >= start && hour < end
        } else {
            hour >= start || hour < end
        }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.contains_hour(time.hour())
    }
}

impl Default for QuietHours {
    fn default() -> Self {
        QuietHours {
            start_hour: DEFAULT_QUIET_START_HOUR,
            end_hour: DEFAULT_QUIET_END_HOUR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_default_wraps_midnight() {
        let quiet = QuietHours::default();
        assert_eq!((quiet.start_hour(), quiet.end_hour()), (22, 8));

        assert!(quiet.contains(at(23, 0)));
        assert!(quiet.contains(at(0, 30)));
        assert!(quiet.contains(at(7, 59)));
        assert!(!quiet.contains(at(8, 0)));
        assert!(!quiet.contains(at(21, 59)));
    }

    #[test]
    fn test_same_day_window() {
        let quiet = QuietHours::new(13, 15).unwrap();
        assert!(quiet.contains_hour(13));
        assert!(quiet.contains_hour(14));
        assert!(!quiet.contains_hour(15));
        assert!(!quiet.contains_hour(12));
    }

    #[test]
    fn test_equal_hours_is_empty() {
        let quiet = QuietHours::new(9, 9).unwrap();
        assert!(quiet.is_empty());
        assert!((0..24).all(|h| !quiet.contains_hour(h)));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(QuietHours::new(24, 8).is_err());
        assert!(QuietHours::new(22, 30).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: QuietHours = serde_json::from_str(r#"{"startHour":21,"endHour":7}"#).unwrap();
        assert_eq!(ok, QuietHours::new(21, 7).unwrap());

        assert!(serde_json::from_str::<QuietHours>(r#"{"startHour":25,"endHour":7}"#).is_err());
        assert!(serde_json::from_str::<QuietHours>(r#"{"startHour":-1,"endHour":7}"#).is_err());
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_value(QuietHours::default()).unwrap();
        assert_eq!(json, serde_json::json!({"startHour": 22, "endHour": 8}));
    }
}
