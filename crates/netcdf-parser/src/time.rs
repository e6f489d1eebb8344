//! CF time coordinate decoding.
//!
//! Daily climate products store their time axis as offsets from a reference
//! date, e.g. gridMET's `day` variable with `units = "days since 1900-01-01 00:00:00"`.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::{NetCdfError, NetCdfResult};

/// Unit of a CF time offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    fn seconds(self) -> f64 {
        match self {
            TimeUnit::Days => 86_400.0,
            TimeUnit::Hours => 3_600.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Seconds => 1.0,
        }
    }
}

/// Parsed `"<unit> since <reference>"` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CfTimeUnits {
    pub unit: TimeUnit,
    pub reference: NaiveDateTime,
}

impl CfTimeUnits {
    /// Parse a CF `units` string such as `"days since 1900-01-01 00:00:00"`.
    pub fn parse(units: &str) -> NetCdfResult<Self> {
        let (unit_str, reference_str) = units
            .split_once(" since ")
            .ok_or_else(|| NetCdfError::InvalidTime(format!("no 'since' in units '{}'", units)))?;

        let unit = match unit_str.trim().to_lowercase().as_str() {
            "days" | "day" | "d" => TimeUnit::Days,
            "hours" | "hour" | "h" => TimeUnit::Hours,
            "minutes" | "minute" | "min" => TimeUnit::Minutes,
            "seconds" | "second" | "s" => TimeUnit::Seconds,
            other => {
                return Err(NetCdfError::InvalidTime(format!(
                    "unsupported time unit '{}'",
                    other
                )))
            }
        };

        let reference = parse_reference(reference_str.trim()).ok_or_else(|| {
            NetCdfError::InvalidTime(format!("bad reference time '{}'", reference_str))
        })?;

        Ok(Self { unit, reference })
    }

    /// Convert an offset to the calendar date it falls on.
    pub fn to_date(&self, offset: f64) -> NetCdfResult<NaiveDate> {
        if !offset.is_finite() {
            return Err(NetCdfError::InvalidTime(format!("non-finite offset {}", offset)));
        }
        let out_of_range = || NetCdfError::InvalidTime(format!("offset {} out of range", offset));
        let seconds = (offset * self.unit.seconds()).round();
        // Fill values such as 9.97e36 would saturate the cast.
        if seconds.abs() >= i64::MAX as f64 {
            return Err(out_of_range());
        }
        let delta = TimeDelta::try_seconds(seconds as i64).ok_or_else(out_of_range)?;
        self.reference
            .checked_add_signed(delta)
            .map(|dt| dt.date())
            .ok_or_else(out_of_range)
    }

    /// Decode every offset of a time axis.
    pub fn decode(&self, offsets: &[f64]) -> NetCdfResult<Vec<NaiveDate>> {
        offsets.iter().map(|&v| self.to_date(v)).collect()
    }
}

fn parse_reference(s: &str) -> Option<NaiveDateTime> {
    // Trailing zone designators ("UTC", "Z", "+0:00") are dropped; daily data
    // only needs the calendar date.
    let s = s.trim_end_matches(" UTC").trim_end_matches('Z');
    let s = s.split_once(" +").map(|(head, _)| head).unwrap_or(s);

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    let date_part = s.split_whitespace().next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
