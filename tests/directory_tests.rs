use hrledger::core::directory::{DirectoryLogic, ListFilter};
use hrledger::core::payroll::PayrollLogic;
use hrledger::db::employees::EmployeeSort;
use hrledger::errors::AppError;
use hrledger::models::employee::EmployeePatch;
use hrledger::models::employee_status::EmployeeStatus;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::thread::sleep;
use std::time::Duration;

mod common;
use common::{add_employee, hrl, init, init_db_with_payroll, new_employee, open_pool, setup_test_db};

#[test]
fn test_employee_add_show_and_list() {
    let db_path = setup_test_db("directory_add_show");
    init(&db_path);
    add_employee(&db_path, "Ada", "Lovelace", "111", "Engineer", "R&D", "58000");

    hrl()
        .args(["--db", &db_path, "employee", "show", "1"])
        .assert()
        .success()
        .stdout(contains("#1 Ada Lovelace"))
        .stdout(contains("ada.lovelace@example.com"))
        .stdout(contains("2021-03-01"))
        .stdout(contains("58,000.00"));

    hrl()
        .args(["--db", &db_path, "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Ada Lovelace"))
        .stdout(contains("1 employee(s)"));
}

#[test]
fn test_employee_add_rejects_invalid_fields() {
    let db_path = setup_test_db("directory_add_invalid");
    init(&db_path);

    hrl()
        .args([
            "--db", &db_path, "employee", "add", "--first", "A", "--last", "B", "--ssn", "1",
            "--email", "not-an-email", "--title", "T", "--division", "D", "--salary", "10",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid email address"));

    hrl()
        .args([
            "--db", &db_path, "employee", "add", "--first", "A", "--last", "B", "--ssn", "1",
            "--email", "a@b.io", "--title", "T", "--division", "D", "--salary", "-10",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid salary"));

    hrl()
        .args([
            "--db", &db_path, "employee", "add", "--first", "A", "--ssn", "1", "--email",
            "a@b.io", "--title", "T", "--division", "D", "--salary", "10",
        ])
        .assert()
        .failure()
        .stderr(contains("last_name"));
}

#[test]
fn test_employee_duplicate_ssn_and_email() {
    let db_path = setup_test_db("directory_duplicates");
    let mut pool = open_pool(&db_path);

    DirectoryLogic::create(&mut pool, new_employee("Ann", "Able", "X-1", 1000.0)).expect("create");

    let mut dup_ssn = new_employee("Bob", "Baker", "X-1", 1000.0);
    dup_ssn.email = "bob@example.com".to_string();
    let err = DirectoryLogic::create(&mut pool, dup_ssn).unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmployee { ref field, .. } if field == "ssn"));

    let mut dup_email = new_employee("Bob", "Baker", "X-2", 1000.0);
    dup_email.email = "X-1@example.com".to_string();
    let err = DirectoryLogic::create(&mut pool, dup_email).unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmployee { ref field, .. } if field == "email"));
}

#[test]
fn test_employee_update_partial_and_timestamps() {
    let db_path = setup_test_db("directory_update");
    let mut pool = open_pool(&db_path);

    let created =
        DirectoryLogic::create(&mut pool, new_employee("Ann", "Able", "U-1", 1000.0)).expect("create");

    sleep(Duration::from_millis(20));

    let patch = EmployeePatch {
        job_title: Some("Lead Engineer".to_string()),
        status: Some(EmployeeStatus::Inactive),
        ..EmployeePatch::default()
    };
    let updated = DirectoryLogic::update(&mut pool, created.id, patch).expect("update");

    assert_eq!(updated.job_title, "Lead Engineer");
    assert_eq!(updated.status, EmployeeStatus::Inactive);
    assert_eq!(updated.first_name, "Ann");
    assert_eq!(updated.salary, 1000.0);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let err = DirectoryLogic::update(&mut pool, created.id, EmployeePatch::default()).unwrap_err();
    assert!(matches!(err, AppError::EmptyPatch));

    let patch = EmployeePatch {
        division: Some("Ops".to_string()),
        ..EmployeePatch::default()
    };
    let err = DirectoryLogic::update(&mut pool, 999, patch).unwrap_err();
    assert!(matches!(err, AppError::EmployeeNotFound(999)));
}

#[test]
fn test_employee_edit_cli() {
    let db_path = init_db_with_payroll("directory_edit_cli");

    hrl()
        .args(["--db", &db_path, "employee", "edit", "2", "--division", "Platform"])
        .assert()
        .success()
        .stdout(contains("Employee #2 updated."))
        .stdout(contains("Platform"));

    hrl()
        .args(["--db", &db_path, "employee", "edit", "2"])
        .assert()
        .failure()
        .stderr(contains("Nothing to update"));

    hrl()
        .args(["--db", &db_path, "employee", "show", "42"])
        .assert()
        .failure()
        .stderr(contains("Employee #42 not found"));
}

#[test]
fn test_employee_list_filters_and_sort() {
    let db_path = setup_test_db("directory_list_filters");
    let mut pool = open_pool(&db_path);

    let mut a = new_employee("Ann", "Zed", "L-1", 3000.0);
    a.division = "Ops".to_string();
    DirectoryLogic::create(&mut pool, a).expect("create");
    DirectoryLogic::create(&mut pool, new_employee("Bob", "Young", "L-2", 1000.0)).expect("create");
    let mut c = new_employee("Cid", "Xavier", "L-3", 2000.0);
    c.status = EmployeeStatus::Inactive;
    DirectoryLogic::create(&mut pool, c).expect("create");

    let by_name = DirectoryLogic::list(&mut pool, &ListFilter::default()).expect("list");
    let names: Vec<&str> = by_name.iter().map(|e| e.last_name.as_str()).collect();
    assert_eq!(names, vec!["Xavier", "Young", "Zed"]);

    let filter = ListFilter {
        sort: EmployeeSort::Salary,
        ..ListFilter::default()
    };
    let by_salary = DirectoryLogic::list(&mut pool, &filter).expect("list");
    let salaries: Vec<f64> = by_salary.iter().map(|e| e.salary).collect();
    assert_eq!(salaries, vec![3000.0, 2000.0, 1000.0]);

    let filter = ListFilter {
        status: Some(EmployeeStatus::Active),
        division: Some("R&D".to_string()),
        ..ListFilter::default()
    };
    let active_rd = DirectoryLogic::list(&mut pool, &filter).expect("list");
    assert_eq!(active_rd.len(), 1);
    assert_eq!(active_rd[0].first_name, "Bob");
}

#[test]
fn test_employee_delete_cascades_to_statements() {
    let db_path = init_db_with_payroll("directory_delete_cascade");

    hrl()
        .args(["--db", &db_path, "employee", "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("Employee #1 Ada Lovelace deleted."));

    let mut pool = open_pool(&db_path);
    assert!(matches!(
        DirectoryLogic::get(&mut pool, 1),
        Err(AppError::EmployeeNotFound(1))
    ));
    assert!(PayrollLogic::list(&mut pool, Some(1), None).expect("list").is_empty());
    assert_eq!(PayrollLogic::list(&mut pool, None, None).expect("list").len(), 2);

    hrl()
        .args(["--db", &db_path, "pay", "list", "--employee", "1"])
        .assert()
        .success()
        .stdout(contains("No pay statements found."));
}

#[test]
fn test_employee_delete_needs_confirmation() {
    let db_path = init_db_with_payroll("directory_delete_cancel");

    hrl()
        .args(["--db", &db_path, "employee", "del", "2"])
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(contains("Deletion cancelled."))
        .stdout(contains("deleted.").not());

    let mut pool = open_pool(&db_path);
    assert!(DirectoryLogic::get(&mut pool, 2).is_ok());
}
