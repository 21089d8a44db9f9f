use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

// ---------------------------------------------------------------------------
// YearMonth – one calendar month, the chart's time unit
// ---------------------------------------------------------------------------

/// Raised when a record carries a month outside `1..=12`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("month {0} is out of range (expected 1..=12)")]
pub struct InvalidMonth(pub u32);

/// A calendar month. The derived ordering on `(year, month)` is chronological,
/// so `YearMonth` works directly as a sort key and range bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based, `1..=12`.
    pub month: u32,
}

impl YearMonth {
    /// Build a validated month.
    pub fn new(year: i32, month: u32) -> Result<Self, InvalidMonth> {
        if (1..=12).contains(&month) {
            Ok(YearMonth { year, month })
        } else {
            Err(InvalidMonth(month))
        }
    }

    /// Continuous x coordinate: months elapsed since year zero.
    pub fn index(self) -> f64 {
        (self.year as i64 * 12 + (self.month as i64 - 1)) as f64
    }

    /// Floor a continuous x coordinate to the month containing it.
    pub fn from_index(x: f64) -> Self {
        let i = x.floor() as i64;
        YearMonth {
            year: i.div_euclid(12) as i32,
            month: (i.rem_euclid(12) + 1) as u32,
        }
    }

    /// The next calendar month, rolling over December.
    pub fn succ(self) -> Self {
        if self.month == 12 {
            YearMonth {
                year: self.year + 1,
                month: 1,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(date) => write!(f, "{}", date.format("%b %Y")),
            None => write!(f, "{}-{:02}", self.year, self.month),
        }
    }
}

// ---------------------------------------------------------------------------
// MonthPoint – one vertex of a plotted line
// ---------------------------------------------------------------------------

/// A `(month, count)` pair. Used for recorded series, the hidden series and
/// the user's sketched line alike; counts are `f64` because sketched points
/// come from a continuous y inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthPoint {
    pub when: YearMonth,
    pub count: f64,
}

impl MonthPoint {
    /// Plot-space coordinates.
    pub fn coords(self) -> [f64; 2] {
        [self.when.index(), self.count]
    }
}

// ---------------------------------------------------------------------------
// RescueRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single row: how many incident calls one animal class generated in one
/// month.
#[derive(Debug, Clone, PartialEq)]
pub struct RescueRecord {
    pub animal_class: String,
    pub when: YearMonth,
    pub count: f64,
}

impl RescueRecord {
    pub fn point(&self) -> MonthPoint {
        MonthPoint {
            when: self.when,
            count: self.count,
        }
    }
}

// ---------------------------------------------------------------------------
// RescueDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with a precomputed class index.
#[derive(Debug, Clone, Default)]
pub struct RescueDataset {
    /// All rows, sorted by class and then chronologically.
    pub records: Vec<RescueRecord>,
    /// Sorted distinct animal classes.
    pub classes: Vec<String>,
}

impl RescueDataset {
    /// Build the dataset, sorting rows so that "first" and "last" points of a
    /// class are well defined regardless of input order.
    pub fn from_records(mut records: Vec<RescueRecord>) -> Self {
        records.sort_by(|a, b| {
            a.animal_class
                .cmp(&b.animal_class)
                .then(a.when.cmp(&b.when))
        });

        let classes: BTreeSet<String> =
            records.iter().map(|r| r.animal_class.clone()).collect();

        RescueDataset {
            records,
            classes: classes.into_iter().collect(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The chronological series of one animal class.
    pub fn class_points(&self, class: &str) -> Vec<MonthPoint> {
        self.records
            .iter()
            .filter(|r| r.animal_class == class)
            .map(RescueRecord::point)
            .collect()
    }
}

// ---------------------------------------------------------------------------
