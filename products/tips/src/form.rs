//! Input side of the view: raw text fields and the submit rules that reset them.

use platform_store::KeyValueStore;

use crate::{
    board::{Outcome, TipBoard},
    employee::{EmployeeDraft, EmployeeId},
    error::TipsResult,
};

/// Converts typed text into a number. Anything that is not a finite number
/// (including an empty field) becomes `0`.
pub fn coerce_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// The two input forms: pool amount, and name plus hours.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TipForm {
    pub pool_amount: f64,
    pub draft: EmployeeDraft,
}

impl TipForm {
    pub fn set_pool_amount(&mut self, raw: &str) {
        self.pool_amount = coerce_number(raw);
    }

    pub fn set_name(&mut self, raw: &str) {
        self.draft.name = raw.to_string();
    }

    pub fn set_hours(&mut self, raw: &str) {
        self.draft.hours = coerce_number(raw);
    }

    /// Funds the pool; the amount field resets to 0 only when accepted.
    pub fn submit_pool<S: KeyValueStore>(&mut self, board: &mut TipBoard<S>) -> TipsResult<Outcome> {
        let outcome = board.fund_pool(self.pool_amount)?;
        if outcome.is_applied() {
            self.pool_amount = 0.0;
        }
        Ok(outcome)
    }

    /// Adds the drafted employee; name and hours clear only when accepted.
    pub fn submit_employee<S: KeyValueStore>(
        &mut self,
        board: &mut TipBoard<S>,
    ) -> TipsResult<Outcome> {
        let outcome = board.add_employee(&self.draft.name, self.draft.hours)?;
        if outcome.is_applied() {
            self.draft = EmployeeDraft::default();
        }
        Ok(outcome)
    }

    /// Pulls the employee out of the roster and into the draft fields.
    /// Returns `false` when the id is unknown.
    pub fn begin_edit<S: KeyValueStore>(
        &mut self,
        board: &mut TipBoard<S>,
        id: EmployeeId,
    ) -> TipsResult<bool> {
        match board.edit_employee(id)? {
            Some(draft) => {
                self.draft = draft;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Rejection;
    use platform_store::MemoryStore;

    #[test]
    fn coercion_treats_garbage_as_zero() {
        assert_eq!(coerce_number("12.5"), 12.5);
        assert_eq!(coerce_number("  7 "), 7.0);
        assert_eq!(coerce_number("1e2"), 100.0);
        assert_eq!(coerce_number("-3"), -3.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("doce"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("inf"), 0.0);
    }

    #[test]
    fn pool_field_resets_only_on_success() {
        let mut board = TipBoard::open(MemoryStore::default()).unwrap();
        let mut form = TipForm::default();

        form.set_pool_amount("-5");
        assert_eq!(
            form.submit_pool(&mut board).unwrap(),
            Outcome::Ignored(Rejection::NonPositiveAmount)
        );
        assert_eq!(form.pool_amount, -5.0);

        form.set_pool_amount("25");
        assert!(form.submit_pool(&mut board).unwrap().is_applied());
        assert_eq!(form.pool_amount, 0.0);
        assert_eq!(board.pool(), Some(25.0));
    }

    #[test]
    fn employee_fields_clear_only_on_success() {
        let mut board = TipBoard::open(MemoryStore::default()).unwrap();
        let mut form = TipForm::default();

        form.set_name("Ana");
        form.set_hours("cuatro");
        assert!(!form.submit_employee(&mut board).unwrap().is_applied());
        assert_eq!(form.draft, EmployeeDraft::new("Ana", 0.0));

        form.set_hours("4");
        assert!(form.submit_employee(&mut board).unwrap().is_applied());
        assert_eq!(form.draft, EmployeeDraft::default());
        assert_eq!(board.employees().len(), 1);
    }

    #[test]
    fn edit_prefills_and_resubmits_with_recompute() {
        let mut board = TipBoard::open(MemoryStore::default()).unwrap();
        board.add_employee("Ana", 4.0).unwrap();
        board.add_employee("Luis", 6.0).unwrap();
        board.fund_pool(100.0).unwrap();
        let ana = board.employees()[0].id;

        let mut form = TipForm::default();
        assert!(form.begin_edit(&mut board, ana).unwrap());
        assert_eq!(form.draft, EmployeeDraft::new("Ana", 4.0));

        form.set_hours("14");
        form.submit_employee(&mut board).unwrap();

        let names: Vec<&str> = board.employees().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Luis", "Ana"]);
        let shares: Vec<f64> = board.employees().iter().map(|e| e.share).collect();
        assert_eq!(shares, vec![30.0, 70.0]);

        assert!(!form.begin_edit(&mut board, ana).unwrap());
    }
}
