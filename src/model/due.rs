use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// How close a due date is, measured in whole local days from today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum DueStatus {
    Overdue(i64),
    Today,
    Tomorrow,
    /// Two to seven days out
    Soon(i64),
    Later(NaiveDate),
}

/// Days out at which a date stops being "soon"
const SOON_DAYS: i64 = 7;

impl DueStatus {
    pub fn classify(due: NaiveDate, today: NaiveDate) -> DueStatus {
        let days = (due - today).num_days();
        match days {
            d if d < 0 => DueStatus::Overdue(-d),
            0 => DueStatus::Today,
            1 => DueStatus::Tomorrow,
            d if d <= SOON_DAYS => DueStatus::Soon(d),
            _ => DueStatus::Later(due),
        }
    }

    pub fn is_overdue(self) -> bool {
        matches!(self, DueStatus::Overdue(_))
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueStatus::Overdue(1) => write!(f, "Overdue by 1 day"),
            DueStatus::Overdue(n) => write!(f, "Overdue by {} days", n),
            DueStatus::Today => write!(f, "Due today"),
            DueStatus::Tomorrow => write!(f, "Due tomorrow"),
            DueStatus::Soon(n) => write!(f, "Due in {} days", n),
            DueStatus::Later(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}
