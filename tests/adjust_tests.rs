use hrledger::core::adjust::{AdjustLogic, SalaryRange, adjusted_salary};
use hrledger::core::directory::DirectoryLogic;
use hrledger::errors::AppError;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{hrl, init_db_with_payroll, new_employee, open_pool, salary_of, setup_test_db};

#[test]
fn test_adjust_range_is_half_open() {
    // #1 58000, #2 104999, #3 105000
    let db_path = init_db_with_payroll("adjust_half_open");

    hrl()
        .args([
            "--db", &db_path, "adjust", "--percent", "3.2", "--min", "58000", "--max", "105000",
            "--yes",
        ])
        .assert()
        .success()
        .stdout(contains("2 employee(s) affected"));

    assert_eq!(salary_of(&db_path, 1), 59856.0);
    assert_eq!(salary_of(&db_path, 2), 108359.0);
    assert_eq!(salary_of(&db_path, 3), 105000.0);
}

#[test]
fn test_adjust_dry_run_writes_nothing() {
    let db_path = init_db_with_payroll("adjust_dry_run");

    hrl()
        .args([
            "--db", &db_path, "adjust", "--percent", "10", "--min", "0", "--max", "200000",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(contains("Dry run: 3 employee(s) affected"));

    assert_eq!(salary_of(&db_path, 1), 58000.0);
    assert_eq!(salary_of(&db_path, 2), 104999.0);
    assert_eq!(salary_of(&db_path, 3), 105000.0);
}

#[test]
fn test_adjust_empty_range_is_success() {
    let db_path = init_db_with_payroll("adjust_empty");

    hrl()
        .args([
            "--db", &db_path, "adjust", "--percent", "5", "--min", "1", "--max", "100", "--yes",
        ])
        .assert()
        .success()
        .stdout(contains("0 employee(s) affected"));
}

#[test]
fn test_adjust_rejects_invalid_input() {
    let db_path = init_db_with_payroll("adjust_invalid");

    hrl()
        .args([
            "--db", &db_path, "adjust", "--percent", "150", "--min", "0", "--max", "10", "--yes",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid percentage"));

    hrl()
        .args([
            "--db", &db_path, "adjust", "--percent", "-1", "--min", "0", "--max", "10", "--yes",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid percentage"));

    hrl()
        .args([
            "--db", &db_path, "adjust", "--percent", "5", "--min", "100", "--max", "100", "--yes",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid salary range"));

    assert_eq!(salary_of(&db_path, 1), 58000.0);
}

#[test]
fn test_adjust_without_confirmation_changes_nothing() {
    let db_path = init_db_with_payroll("adjust_cancelled");

    // answering "n" to the prompt leaves every salary as it was
    hrl()
        .args([
            "--db", &db_path, "adjust", "--percent", "10", "--min", "0", "--max", "200000",
        ])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Adjustment cancelled"));

    assert_eq!(salary_of(&db_path, 1), 58000.0);
}

#[test]
fn test_adjust_confirmation_preview_is_not_labelled_dry_run() {
    let db_path = init_db_with_payroll("adjust_preview_label");

    hrl()
        .args([
            "--db", &db_path, "adjust", "--percent", "10", "--min", "0", "--max", "200000",
        ])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Preview: 3 employee(s) affected"))
        .stdout(contains("Dry run:").not());

    hrl()
        .args([
            "--db", &db_path, "adjust", "--percent", "10", "--min", "0", "--max", "200000",
        ])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Preview: 3 employee(s) affected"))
        .stdout(contains("Dry run:").not());

    assert_eq!(salary_of(&db_path, 1), 63800.0);
}

#[test]
fn test_adjusted_salary_rounding() {
    assert_eq!(adjusted_salary(58000.0, 3.2), 59856.0);
    assert_eq!(adjusted_salary(104999.0, 3.2), 108359.0);
    assert_eq!(adjusted_salary(1000.0, 0.0), 1000.0);
    // 10 * 1.05 = 10.5 rounds away from zero
    assert_eq!(adjusted_salary(10.0, 5.0), 11.0);
}

#[test]
fn test_salary_range_validation() {
    assert!(SalaryRange::new(0.0, 1.0).is_ok());
    assert!(matches!(
        SalaryRange::new(-1.0, 10.0),
        Err(AppError::InvalidSalaryRange { .. })
    ));
    assert!(matches!(
        SalaryRange::new(10.0, 5.0),
        Err(AppError::InvalidSalaryRange { .. })
    ));

    let r = SalaryRange::new(58000.0, 105000.0).expect("range");
    assert!(r.contains(58000.0));
    assert!(r.contains(104999.0));
    assert!(!r.contains(105000.0));
}

#[test]
fn test_adjust_logic_validates_percentage_itself() {
    let db_path = setup_test_db("adjust_logic_pct");
    let mut pool = open_pool(&db_path);
    let range = SalaryRange { min: 0.0, max: 10.0 };

    let err = AdjustLogic::apply(&mut pool, 100.5, range, false).unwrap_err();
    assert!(matches!(err, AppError::InvalidPercentage(_)));

    // a range built without the constructor is still checked
    let bad = SalaryRange { min: 5.0, max: 1.0 };
    let err = AdjustLogic::apply(&mut pool, 1.0, bad, false).unwrap_err();
    assert!(matches!(err, AppError::InvalidSalaryRange { .. }));
}

#[test]
fn test_adjust_failure_rolls_back_every_update() {
    let db_path = setup_test_db("adjust_atomic");
    let mut pool = open_pool(&db_path);

    let a = DirectoryLogic::create(&mut pool, new_employee("Ann", "Able", "S-1", 50000.0))
        .expect("create");
    let b = DirectoryLogic::create(&mut pool, new_employee("Bob", "Baker", "S-2", 60000.0))
        .expect("create");
    let c = DirectoryLogic::create(&mut pool, new_employee("Cid", "Cole", "S-3", 70000.0))
        .expect("create");

    // the second update of the batch fails
    pool.conn
        .execute_batch(&format!(
            "CREATE TRIGGER fail_salary BEFORE UPDATE OF salary ON employees
             WHEN NEW.id = {}
             BEGIN SELECT RAISE(ABORT, 'boom'); END;",
            b.id
        ))
        .expect("trigger");

    let range = SalaryRange::new(0.0, 100000.0).expect("range");
    let err = AdjustLogic::apply(&mut pool, 10.0, range, false).unwrap_err();
    assert!(matches!(err, AppError::AdjustmentAborted(_)));

    for (id, salary) in [(a.id, 50000.0), (b.id, 60000.0), (c.id, 70000.0)] {
        assert_eq!(DirectoryLogic::get(&mut pool, id).expect("get").salary, salary);
    }
}

#[test]
fn test_adjust_logic_reports_changes_and_audits() {
    let db_path = setup_test_db("adjust_logic_changes");
    let mut pool = open_pool(&db_path);

    let a = DirectoryLogic::create(&mut pool, new_employee("Ann", "Able", "T-1", 58000.0))
        .expect("create");
    DirectoryLogic::create(&mut pool, new_employee("Bob", "Baker", "T-2", 105000.0))
        .expect("create");

    let range = SalaryRange::new(58000.0, 105000.0).expect("range");
    let adj = AdjustLogic::apply(&mut pool, 3.2, range, false).expect("apply");

    assert_eq!(adj.affected(), 1);
    assert_eq!(adj.changes[0].employee_id, a.id);
    assert_eq!(adj.changes[0].old_salary, 58000.0);
    assert_eq!(adj.changes[0].new_salary, 59856.0);
    assert_eq!(adj.total_increase(), 1856.0);

    let audits: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'adjust'",
            [],
            |r| r.get(0),
        )
        .expect("count");
    assert_eq!(audits, 1);
}
