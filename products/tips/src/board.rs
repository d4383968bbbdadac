//! State-owning tip board. Every mutation goes through here.

use std::fmt;

use platform_store::KeyValueStore;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    allocation,
    employee::{Employee, EmployeeDraft, EmployeeId, IdGenerator},
    error::TipsResult,
    slots,
};

/// Why a mutation was ignored. Rejected input is never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    NonPositiveAmount,
    BlankName,
    NonPositiveHours,
    UnknownEmployee,
    /// The pool, the total hours or a share would no longer be a finite number.
    Overflow,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::NonPositiveAmount => "amount must be greater than zero",
            Rejection::BlankName => "name is empty",
            Rejection::NonPositiveHours => "hours must be greater than zero",
            Rejection::UnknownEmployee => "no employee with that id",
            Rejection::Overflow => "result is too large to represent",
        };
        f.write_str(reason)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Read-only view of the board, suitable for rendering or JSON output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub pool: Option<f64>,
    pub total_hours: f64,
    pub price_per_hour: Option<f64>,
    pub employees: Vec<Employee>,
}

/// Pool total plus roster, loaded from and written back to a
/// [`KeyValueStore`].
///
/// Funding the pool and adding an employee recompute every share. Removing
/// an employee and clearing the pool leave shares as they were until the next
/// recomputing mutation.
pub struct TipBoard<S> {
    store: S,
    pool: Option<f64>,
    roster: Vec<Employee>,
    ids: IdGenerator,
}

impl<S: KeyValueStore> TipBoard<S> {
    /// Loads both slots. Absent slots give an empty roster and no pool.
    #[instrument(name = "board.open", skip_all)]
    pub fn open(store: S) -> TipsResult<Self> {
        let roster = slots::load_roster(&store)?;
        let pool = slots::load_pool(&store)?;
        let ids = IdGenerator::seeded(&roster);
        info!(employees = roster.len(), pool = ?pool, "tip board loaded");
        Ok(Self {
            store,
            pool,
            roster,
            ids,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn pool(&self) -> Option<f64> {
        self.pool
    }

    pub fn employees(&self) -> &[Employee] {
        &self.roster
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.roster.iter().find(|emp| emp.id == id)
    }

    pub fn total_hours(&self) -> f64 {
        allocation::total_hours(&self.roster)
    }

    /// Current rate for the pool on hand; `None` without a pool or hours.
    pub fn price_per_hour(&self) -> Option<f64> {
        let pool = self.pool?;
        allocation::price_per_hour(pool, &self.roster)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            pool: self.pool,
            total_hours: self.total_hours(),
            price_per_hour: self.price_per_hour(),
            employees: self.roster.clone(),
        }
    }

    pub fn headcount_label(&self) -> String {
        match self.roster.len() {
            1 => "1 employee".to_string(),
            n => format!("{n} employees"),
        }
    }

    /// Adds `amount` to the pool and recomputes every share.
    #[instrument(name = "board.fund_pool", skip(self))]
    pub fn fund_pool(&mut self, amount: f64) -> TipsResult<Outcome> {
        if !(amount.is_finite() && amount > 0.0) {
            return Ok(reject(Rejection::NonPositiveAmount));
        }
        let total = self.pool.unwrap_or(0.0) + amount;
        if !total.is_finite() {
            return Ok(reject(Rejection::Overflow));
        }
        let roster = allocation::recompute(total, &self.roster);
        if !shares_are_finite(&roster) {
            return Ok(reject(Rejection::Overflow));
        }

        // Fields change only after both writes succeed. A failed roster write
        // can still leave the new total in the pool slot.
        slots::save_pool(&mut self.store, Some(total))?;
        slots::save_roster(&mut self.store, &roster)?;
        self.pool = Some(total);
        self.roster = roster;
        info!(total, "pool funded");
        Ok(Outcome::Applied)
    }

    /// Forgets the pool and its slot. Shares are left as they are.
    #[instrument(name = "board.clear_pool", skip(self))]
    pub fn clear_pool(&mut self) -> TipsResult<Outcome> {
        slots::remove_pool(&mut self.store)?;
        self.pool = None;
        info!("pool cleared");
        Ok(Outcome::Applied)
    }

    /// Appends a new employee and recomputes every share against the
    /// current pool.
    #[instrument(name = "board.add_employee", skip(self))]
    pub fn add_employee(&mut self, name: &str, hours: f64) -> TipsResult<Outcome> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(reject(Rejection::BlankName));
        }
        if !(hours.is_finite() && hours > 0.0) {
            return Ok(reject(Rejection::NonPositiveHours));
        }

        if !(self.total_hours() + hours).is_finite() {
            return Ok(reject(Rejection::Overflow));
        }

        let id = self.ids.next_id();
        let mut roster = self.roster.clone();
        roster.push(Employee::new(id, name, hours));
        let roster = allocation::recompute(self.pool.unwrap_or(0.0), &roster);
        if !shares_are_finite(&roster) {
            return Ok(reject(Rejection::Overflow));
        }
        slots::save_roster(&mut self.store, &roster)?;
        self.roster = roster;
        info!(%id, "employee added");
        Ok(Outcome::Applied)
    }

    /// Drops the employee without recomputing the others.
    #[instrument(name = "board.remove_employee", skip(self))]
    pub fn remove_employee(&mut self, id: EmployeeId) -> TipsResult<Outcome> {
        let Some(index) = self.roster.iter().position(|emp| emp.id == id) else {
            return Ok(reject(Rejection::UnknownEmployee));
        };
        let mut roster = self.roster.clone();
        roster.remove(index);
        slots::save_roster(&mut self.store, &roster)?;
        self.roster = roster;
        info!("employee removed");
        Ok(Outcome::Applied)
    }

    /// Removes the employee and hands back its name and hours so they can be
    /// corrected and submitted again through [`TipBoard::add_employee`].
    #[instrument(name = "board.edit_employee", skip(self))]
    pub fn edit_employee(&mut self, id: EmployeeId) -> TipsResult<Option<EmployeeDraft>> {
        let Some(draft) = self.employee(id).map(Employee::to_draft) else {
            debug!(reason = %Rejection::UnknownEmployee, "edit ignored");
            return Ok(None);
        };
        self.remove_employee(id)?;
        Ok(Some(draft))
    }
}

fn shares_are_finite(roster: &[Employee]) -> bool {
    roster.iter().all(|emp| emp.share.is_finite())
}

fn reject(reason: Rejection) -> Outcome {
    debug!(%reason, "mutation ignored");
    Outcome::Ignored(reason)
}
