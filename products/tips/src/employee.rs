use std::{fmt, str::FromStr};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Creation-time identifier, milliseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmployeeId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse().map(EmployeeId)
    }
}

/// A roster entry. Field names on the wire match the browser slot format.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "horas")]
    pub hours: f64,
    /// Derived by the allocation engine, never set by the user.
    #[serde(rename = "cantidad", default)]
    pub share: f64,
}

impl Employee {
    pub fn new(id: EmployeeId, name: impl Into<String>, hours: f64) -> Self {
        Self {
            id,
            name: name.into(),
            hours,
            share: 0.0,
        }
    }

    pub fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            hours: self.hours,
        }
    }
}

/// Name and hours as typed into the employee form, before submission.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub hours: f64,
}

impl EmployeeDraft {
    pub fn new(name: impl Into<String>, hours: f64) -> Self {
        Self {
            name: name.into(),
            hours,
        }
    }
}

/// Hands out time-based ids that never repeat, even when two employees are
/// added within the same millisecond or the clock steps backwards.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Seeds from the largest id already in `roster`.
    pub fn seeded(roster: &[Employee]) -> Self {
        let last = roster.iter().map(|emp| emp.id.0).max().unwrap_or(0);
        Self { last }
    }

    pub fn next_id(&mut self) -> EmployeeId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last.saturating_add(1));
        self.last = id;
        EmployeeId(id)
    }
}
