//! Seasons
//!
//! Inclusive month windows used by seasonal discounts and purchase-month conditions.

use std::fmt;

/// A named, inclusive window of calendar months.
///
/// A window whose start month is after its end month wraps over the year boundary,
/// so `Nov..=Feb` matches November, December, January and February.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    name: String,
    start_month: i8,
    end_month: i8,
}

impl Season {
    /// Create a new season spanning `start_month..=end_month` (1 = January).
    pub fn new(name: impl Into<String>, start_month: i8, end_month: i8) -> Self {
        Self {
            name: name.into(),
            start_month,
            end_month,
        }
    }

    /// The December holiday season.
    pub fn holiday() -> Self {
        Self::new("Holiday", 12, 12)
    }

    /// June through August.
    pub fn summer() -> Self {
        Self::new("Summer", 6, 8)
    }

    /// Season name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First month of the window
    pub fn start_month(&self) -> i8 {
        self.start_month
    }

    /// Last month of the window
    pub fn end_month(&self) -> i8 {
        self.end_month
    }

    /// Whether the given month (1-12) falls inside the window.
    pub fn contains(&self, month: i8) -> bool {
        if self.start_month <= self.end_month {
            (self.start_month..=self.end_month).contains(&month)
        } else {
            month >= self.start_month || month <= self.end_month
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
