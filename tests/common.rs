#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use hrledger::db::initialize::init_db;
use hrledger::db::pool::DbPool;
use hrledger::models::employee::NewEmployee;
use hrledger::models::employee_status::EmployeeStatus;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn hrl() -> Command {
    cargo_bin_cmd!("hrledger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hrledger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write `content` to a temporary CSV file and return its path
pub fn temp_csv(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hrledger.csv", name));
    fs::write(&path, content).expect("write csv");
    path.to_string_lossy().to_string()
}

/// `hrledger --db <db> --test init`
pub fn init(db_path: &str) {
    hrl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Add an employee through the CLI. In a fresh database ids are 1, 2, 3… in call order.
pub fn add_employee(
    db_path: &str,
    first: &str,
    last: &str,
    ssn: &str,
    title: &str,
    division: &str,
    salary: &str,
) {
    let email = format!(
        "{}.{}@example.com",
        first.to_lowercase(),
        last.to_lowercase()
    );

    hrl()
        .args([
            "--db", db_path, "employee", "add", "--first", first, "--last", last, "--ssn", ssn,
            "--email", &email, "--hired", "2021-03-01", "--title", title, "--division",
            division, "--salary", salary,
        ])
        .assert()
        .success();
}

/// Open the test database through the library with the schema in place
pub fn open_pool(db_path: &str) -> DbPool {
    let pool = DbPool::new(db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn new_employee(first: &str, last: &str, ssn: &str, salary: f64) -> NewEmployee {
    NewEmployee {
        first_name: first.to_string(),
        last_name: last.to_string(),
        ssn: ssn.to_string(),
        email: format!("{}@example.com", ssn),
        phone: None,
        hire_date: chrono::NaiveDate::from_ymd_opt(2020, 1, 15).expect("date"),
        job_title: "Engineer".to_string(),
        division: "R&D".to_string(),
        salary,
        status: EmployeeStatus::Active,
    }
}

pub fn salary_of(db_path: &str, id: i64) -> f64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row("SELECT salary FROM employees WHERE id = ?1", [id], |r| {
        r.get(0)
    })
    .expect("salary")
}

/// Three employees plus four statements:
///  #1 Ada Lovelace   Engineer / R&D    2024-01-01..15 1000, 2024-01-16..31 1500
///  #2 Grace Hopper   Engineer / Ops    2024-01-01..31 2000
///  #3 Alan Turing    Analyst  / R&D    2024-01-20..2024-02-05 9999 (crosses months)
pub fn init_db_with_payroll(name: &str) -> String {
    let db = setup_test_db(name);
    let db_path = db.as_str();
    init(db_path);
    add_employee(db_path, "Ada", "Lovelace", "111-11-1111", "Engineer", "R&D", "58000");
    add_employee(db_path, "Grace", "Hopper", "222-22-2222", "Engineer", "Ops", "104999");
    add_employee(db_path, "Alan", "Turing", "333-33-3333", "Analyst", "R&D", "105000");

    let csv = temp_csv(
        &format!("{}_payroll", name),
        "employee_id,period_start,period_end,gross_pay,deductions,net_pay\n\
         1,2024-01-01,2024-01-15,1000,200,800\n\
         1,2024-01-16,2024-01-31,1500,300,1200\n\
         2,2024-01-01,2024-01-31,2000,400,1600\n\
         3,2024-01-20,2024-02-05,9999,0,9999\n",
    );

    hrl()
        .args(["--db", db_path, "import", "pay", &csv])
        .assert()
        .success();

    db
}
