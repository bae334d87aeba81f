//! Proportional timeline positions and axis ticks
//!
//! A task's due date is placed on a 0-100% axis whose span depends on the
//! zoom level: one day, one calendar month, or one calendar year. All inputs
//! are wall-clock values already normalized through the reference frame.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MINUTES_PER_DAY: f64 = 1440.0;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Timeline zoom level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }

    /// Whether `date` lies in the window this granularity anchors at `reference`
    pub fn contains(&self, date: NaiveDate, reference: NaiveDate) -> bool {
        match self {
            Granularity::Day => date == reference,
            Granularity::Month => date.year() == reference.year() && date.month() == reference.month(),
            Granularity::Year => date.year() == reference.year(),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "month" => Ok(Granularity::Month),
            "year" => Ok(Granularity::Year),
            _ => Err(format!(
                "Invalid granularity '{}'. Valid options are: day, month, year",
                s
            )),
        }
    }
}

/// Placement of one task on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub percent: f64,
    pub label: String,
}

/// One axis tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub percent: f64,
    pub label: String,
}

/// Abbreviated English month name for a 1-based month
pub fn month_abbreviation(month: u32) -> &'static str {
    MONTH_ABBREVIATIONS[(month.clamp(1, 12) - 1) as usize]
}

/// Number of days in the calendar month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let Some(first) = date.with_day(1) else {
        return 31;
    };
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        // Only December of the last representable year gets here.
        None => 31,
    }
}

/// `index / span` as a percentage; a zero span pins everything to 0%
fn fraction_percent(index: u32, span: u32) -> f64 {
    if span == 0 {
        return 0.0;
    }
    (f64::from(index) / f64::from(span) * 100.0).clamp(0.0, 100.0)
}

/// Position of `due` on the timeline for `granularity`
///
/// An absent due date yields 0% and an empty label.
pub fn position(due: Option<NaiveDateTime>, granularity: Granularity) -> Position {
    let Some(due) = due else {
        return Position {
            percent: 0.0,
            label: String::new(),
        };
    };

    match granularity {
        Granularity::Day => {
            let minutes = f64::from(due.num_seconds_from_midnight()) / 60.0;
            Position {
                percent: (minutes / MINUTES_PER_DAY * 100.0).clamp(0.0, 100.0),
                label: format!("{:02}:{:02}", due.hour(), due.minute()),
            }
        }
        Granularity::Month => {
            let days = days_in_month(due.date());
            Position {
                percent: fraction_percent(due.day() - 1, days.saturating_sub(1)),
                label: format!("{} {}", due.day(), month_abbreviation(due.month())),
            }
        }
        Granularity::Year => {
            let days = f64::from(days_in_month(due.date()));
            let month_part = f64::from(due.month0()) / 12.0;
            let day_part = f64::from(due.day() - 1) / days / 12.0;
            Position {
                percent: ((month_part + day_part) * 100.0).clamp(0.0, 100.0),
                label: format!("{} {}", month_abbreviation(due.month()), due.day()),
            }
        }
    }
}

/// Axis ticks for `granularity`, anchored at `reference`
pub fn timeline_labels(granularity: Granularity, reference: NaiveDate) -> Vec<Tick> {
    match granularity {
        Granularity::Day => (0..=24)
            .map(|hour| Tick {
                percent: fraction_percent(hour, 24),
                label: format!("{:02}:00", hour),
            })
            .collect(),
        Granularity::Month => {
            let days = days_in_month(reference);
            (0..days)
                .map(|i| Tick {
                    percent: fraction_percent(i, days - 1),
                    label: format!("{}", i + 1),
                })
                .collect()
        }
        Granularity::Year => (0..=12)
            .map(|i| Tick {
                percent: fraction_percent(i, 12),
                label: if i < 12 {
                    month_abbreviation(i + 1).to_string()
                } else {
                    String::new()
                },
            })
            .collect(),
    }
}
