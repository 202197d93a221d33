use hrledger::core::import::ImportLogic;
use hrledger::core::payroll::PayrollLogic;
use hrledger::errors::AppError;
use hrledger::models::pay_group::Month;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{hrl, init, init_db_with_payroll, open_pool, setup_test_db, temp_csv, temp_out};

#[test]
fn test_import_employees_csv() {
    let db_path = setup_test_db("import_employees");
    init(&db_path);

    let csv = temp_csv(
        "import_employees",
        "first_name,last_name,ssn,email,phone,hire_date,job_title,division,salary,status\n\
         Ada,Lovelace,111,ada@example.com,,2020-01-10,Engineer,R&D,58000,active\n\
         Grace,Hopper,222,grace@example.com,555-0100,2019-05-01,Admiral,Ops,90000,inactive\n",
    );

    hrl()
        .args(["--db", &db_path, "import", "employees", &csv])
        .assert()
        .success()
        .stdout(contains("Imported 2 employee(s)."));

    hrl()
        .args(["--db", &db_path, "employee", "list", "--status", "inactive"])
        .assert()
        .success()
        .stdout(contains("Grace Hopper"))
        .stdout(contains("1 employee(s)"));
}

#[test]
fn test_import_is_all_or_nothing() {
    let db_path = setup_test_db("import_atomic");
    let mut pool = open_pool(&db_path);

    // third line repeats the first identity number
    let csv = temp_csv(
        "import_atomic",
        "first_name,last_name,ssn,email,phone,hire_date,job_title,division,salary,status\n\
         Ada,Lovelace,111,ada@example.com,,2020-01-10,Engineer,R&D,58000,\n\
         Ada,Clone,111,clone@example.com,,2020-01-10,Engineer,R&D,58000,\n",
    );

    let err = ImportLogic::employees(&mut pool, Path::new(&csv)).unwrap_err();
    assert!(matches!(err, AppError::Import { line: 3, .. }));

    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM employees", [], |r| r.get(0))
        .expect("count");
    assert_eq!(count, 0);
}

#[test]
fn test_import_error_line_counts_multiline_fields() {
    let db_path = setup_test_db("import_multiline");
    let mut pool = open_pool(&db_path);

    // the quoted job title on the first row spans lines 2 and 3
    let csv = temp_csv(
        "import_multiline",
        "first_name,last_name,ssn,email,phone,hire_date,job_title,division,salary,status\n\
         Ada,Lovelace,111,ada@example.com,,2020-01-10,\"Senior\nEngineer\",R&D,58000,\n\
         Grace,Hopper,222,not-an-email,,2019-05-01,Admiral,Ops,90000,\n",
    );

    let err = ImportLogic::employees(&mut pool, Path::new(&csv)).unwrap_err();
    assert!(
        matches!(err, AppError::Import { line: 4, .. }),
        "unexpected error: {err:?}"
    );

    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM employees", [], |r| r.get(0))
        .expect("count");
    assert_eq!(count, 0);
}

#[test]
fn test_import_pay_validation() {
    let db_path = init_db_with_payroll("import_pay_validation");
    let mut pool = open_pool(&db_path);

    let unknown = temp_csv(
        "import_pay_unknown",
        "employee_id,period_start,period_end,gross_pay,deductions,net_pay\n\
         99,2024-03-01,2024-03-31,100,0,100\n",
    );
    let err = ImportLogic::pay_statements(&mut pool, Path::new(&unknown)).unwrap_err();
    assert!(matches!(err, AppError::Import { line: 2, .. }));

    let reversed = temp_csv(
        "import_pay_reversed",
        "employee_id,period_start,period_end,gross_pay,deductions,net_pay\n\
         1,2024-03-31,2024-03-01,100,0,100\n",
    );
    let err = ImportLogic::pay_statements(&mut pool, Path::new(&reversed)).unwrap_err();
    assert!(matches!(err, AppError::Import { line: 2, .. }));

    let mismatch = temp_csv(
        "import_pay_mismatch",
        "employee_id,period_start,period_end,gross_pay,deductions,net_pay\n\
         1,2024-03-01,2024-03-31,1000,100,950\n",
    );
    let summary = ImportLogic::pay_statements(&mut pool, Path::new(&mismatch)).expect("import");
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.warnings.len(), 1);

    let march = PayrollLogic::list(&mut pool, None, Some(Month::parse("2024-03").expect("month")))
        .expect("list");
    assert_eq!(march.len(), 1);
    assert_eq!(march[0].net_pay, 950.0);
}

#[test]
fn test_pay_list_cli() {
    let db_path = init_db_with_payroll("pay_list_cli");

    hrl()
        .args(["--db", &db_path, "pay", "list", "--employee", "1", "--month", "2024-01"])
        .assert()
        .success()
        .stdout(contains("2 statement(s)"))
        .stdout(contains("1,500.00"));
}

#[test]
fn test_export_report_csv_and_json() {
    let db_path = init_db_with_payroll("export_report");

    let csv_out = temp_out("export_report", "csv");
    hrl()
        .args([
            "--db", &db_path, "export", "report", "--month", "2024-01", "--by", "division",
            "--format", "csv", "--file", &csv_out,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&csv_out).expect("read csv");
    assert!(content.starts_with("month,group_by,key,total_pay,employee_count,average_pay"));
    assert!(content.contains("2024-01,division,Ops,2000.0,1,2000"));
    assert!(content.contains("2024-01,division,R&D,2500.0,2,1250"));

    let json_out = temp_out("export_report", "json");
    hrl()
        .args([
            "--db", &db_path, "export", "report", "--month", "2024-01", "--format", "json",
            "--file", &json_out,
        ])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).expect("read json")).expect("json");
    let groups = json.as_array().expect("array");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["key"], "Engineer");
    assert_eq!(groups[0]["employee_count"], 3);
}

#[test]
fn test_export_employees_xlsx() {
    let db_path = init_db_with_payroll("export_employees_xlsx");
    let out = temp_out("export_employees", "xlsx");

    hrl()
        .args([
            "--db", &db_path, "export", "employees", "--format", "xlsx", "--file", &out,
        ])
        .assert()
        .success()
        .stdout(contains("3 employee(s) written as xlsx"));

    assert!(fs::metadata(&out).expect("xlsx").len() > 0);
}

#[test]
fn test_export_employees_csv_leaves_out_identity_number() {
    let db_path = init_db_with_payroll("export_employees_csv");
    let out = temp_out("export_employees", "csv");

    hrl()
        .args(["--db", &db_path, "export", "employees", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read csv");
    assert!(content.contains("Lovelace"));
    assert!(!content.contains("111-11-1111"));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = init_db_with_payroll("export_relative");

    hrl()
        .args(["--db", &db_path, "export", "employees", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_existing_file_needs_force() {
    let db_path = init_db_with_payroll("export_force");
    let out = temp_out("export_force", "csv");
    fs::write(&out, "keep me").expect("write");

    hrl()
        .args(["--db", &db_path, "export", "employees", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));
    assert_eq!(fs::read_to_string(&out).expect("read"), "keep me");

    hrl()
        .args(["--db", &db_path, "export", "employees", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).expect("read").contains("Lovelace"));
}
