//! Proportional allocation of the pool over hours worked.

use crate::employee::Employee;

pub fn total_hours(roster: &[Employee]) -> f64 {
    roster.iter().map(|emp| emp.hours).sum()
}

/// `pool / total_hours`, or `None` when nobody has hours to divide by.
pub fn price_per_hour(pool: f64, roster: &[Employee]) -> Option<f64> {
    let total = total_hours(roster);
    if total == 0.0 {
        None
    } else {
        Some(pool / total)
    }
}

/// Returns the roster with every share set to `hours * pool / total_hours`.
///
/// With zero total hours the roster comes back untouched, prior shares
/// included.
pub fn recompute(pool: f64, roster: &[Employee]) -> Vec<Employee> {
    let Some(rate) = price_per_hour(pool, roster) else {
        return roster.to_vec();
    };
    roster
        .iter()
        .map(|emp| Employee {
            share: emp.hours * rate,
            ..emp.clone()
        })
        .collect()
}
