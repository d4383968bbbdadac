use platform_store::{KeyValueStore, MemoryStore};
use products_tips::{
    EmployeeId, Outcome, Rejection, TipBoard,
    slots::{POOL_SLOT, ROSTER_SLOT},
};

fn empty_board() -> TipBoard<MemoryStore> {
    TipBoard::open(MemoryStore::default()).unwrap()
}

/// Ana 4h and Luis 6h, then 100 in the pool.
fn ana_and_luis() -> (TipBoard<MemoryStore>, EmployeeId, EmployeeId) {
    let mut board = empty_board();
    board.add_employee("Ana", 4.0).unwrap();
    board.add_employee("Luis", 6.0).unwrap();
    board.fund_pool(100.0).unwrap();
    let ana = board.employees()[0].id;
    let luis = board.employees()[1].id;
    (board, ana, luis)
}

fn share_of(board: &TipBoard<MemoryStore>, id: EmployeeId) -> f64 {
    board.employee(id).map(|emp| emp.share).unwrap()
}

#[test]
fn funding_an_empty_roster_only_moves_the_pool() {
    let mut board = empty_board();
    board.fund_pool(100.0).unwrap();
    assert_eq!(board.pool(), Some(100.0));
    assert!(board.employees().is_empty());
}

#[test]
fn funding_splits_by_hours() {
    let (board, ana, luis) = ana_and_luis();
    assert_eq!(board.total_hours(), 10.0);
    assert_eq!(board.price_per_hour(), Some(10.0));
    assert_eq!(share_of(&board, ana), 40.0);
    assert_eq!(share_of(&board, luis), 60.0);
}

#[test]
fn adding_an_employee_rebalances_everyone() {
    let (mut board, ana, luis) = ana_and_luis();
    board.add_employee("Eva", 10.0).unwrap();
    let eva = board.employees()[2].id;

    assert_eq!(board.price_per_hour(), Some(5.0));
    assert_eq!(share_of(&board, ana), 20.0);
    assert_eq!(share_of(&board, luis), 30.0);
    assert_eq!(share_of(&board, eva), 50.0);
}

#[test]
fn removing_leaves_remaining_shares_stale() {
    let (mut board, ana, luis) = ana_and_luis();
    assert_eq!(board.remove_employee(ana).unwrap(), Outcome::Applied);

    assert_eq!(board.employees().len(), 1);
    assert_eq!(share_of(&board, luis), 60.0);

    // the next funding catches up
    board.fund_pool(20.0).unwrap();
    assert_eq!(share_of(&board, luis), 120.0);
}

#[test]
fn clearing_the_pool_leaves_shares_stale() {
    let (mut board, ana, luis) = ana_and_luis();
    board.clear_pool().unwrap();

    assert_eq!(board.pool(), None);
    assert_eq!(board.store().get(POOL_SLOT).unwrap(), None);
    assert_eq!(share_of(&board, ana), 40.0);
    assert_eq!(share_of(&board, luis), 60.0);

    // an add after clearing recomputes against an empty pool
    board.add_employee("Eva", 10.0).unwrap();
    assert!(board.employees().iter().all(|emp| emp.share == 0.0));
}

#[test]
fn rejected_inputs_change_nothing() {
    let (mut board, _, _) = ana_and_luis();
    let before = board.snapshot();
    let roster_slot = board.store().get(ROSTER_SLOT).unwrap();
    let pool_slot = board.store().get(POOL_SLOT).unwrap();

    assert_eq!(
        board.fund_pool(0.0).unwrap(),
        Outcome::Ignored(Rejection::NonPositiveAmount)
    );
    assert_eq!(
        board.fund_pool(-5.0).unwrap(),
        Outcome::Ignored(Rejection::NonPositiveAmount)
    );
    assert_eq!(
        board.add_employee("", 3.0).unwrap(),
        Outcome::Ignored(Rejection::BlankName)
    );
    assert_eq!(
        board.add_employee("Bob", 0.0).unwrap(),
        Outcome::Ignored(Rejection::NonPositiveHours)
    );

    assert_eq!(board.snapshot(), before);
    assert_eq!(board.store().get(ROSTER_SLOT).unwrap(), roster_slot);
    assert_eq!(board.store().get(POOL_SLOT).unwrap(), pool_slot);
}

#[test]
fn editing_resubmits_against_the_smaller_roster() {
    let (mut board, ana, luis) = ana_and_luis();
    let draft = board.edit_employee(ana).unwrap().unwrap();
    assert_eq!(share_of(&board, luis), 60.0);

    board.add_employee(&draft.name, 14.0).unwrap();
    let new_ana = board.employees()[1].id;
    assert_ne!(new_ana, ana);
    assert_eq!(share_of(&board, luis), 30.0);
    assert_eq!(share_of(&board, new_ana), 70.0);
}

#[test]
fn state_survives_reopening_the_store() {
    let (board, ana, luis) = ana_and_luis();
    let reopened = TipBoard::open(board.into_store()).unwrap();

    assert_eq!(reopened.pool(), Some(100.0));
    assert_eq!(share_of(&reopened, ana), 40.0);
    assert_eq!(share_of(&reopened, luis), 60.0);
    assert_eq!(reopened.employees()[0].name, "Ana");
}
