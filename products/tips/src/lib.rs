//! Tip pool ("bote") splitting.
//!
//! A [`TipBoard`] owns the pool total and the employee roster, persists both
//! into two key-value slots and recomputes every employee's share whenever
//! the pool is funded or an employee is added.

pub mod allocation;
pub mod board;
pub mod employee;
pub mod error;
pub mod form;
pub mod slots;

pub use board::{BoardSnapshot, Outcome, Rejection, TipBoard};
pub use employee::{Employee, EmployeeDraft, EmployeeId, IdGenerator};
pub use error::{TipsError, TipsResult};
pub use form::{TipForm, coerce_number};

/// Plain `€ 12.50` rendering used by every surface.
pub fn format_amount(amount: f64) -> String {
    format!("€ {amount:.2}")
}
