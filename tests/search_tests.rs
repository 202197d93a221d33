use hrledger::core::directory::DirectoryLogic;
use hrledger::core::search::SearchLogic;
use hrledger::errors::AppError;
use hrledger::models::search_field::SearchField;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{
    add_employee, hrl, init, init_db_with_payroll, new_employee, open_pool, setup_test_db,
};

#[test]
fn test_search_by_name_is_case_insensitive_on_either_name() {
    let db_path = init_db_with_payroll("search_name");

    // "LOVE" matches last name Lovelace, "ala" matches first name Alan
    hrl()
        .args(["--db", &db_path, "search", "LOVE", "--by", "name"])
        .assert()
        .success()
        .stdout(contains("Ada Lovelace"))
        .stdout(contains("Grace Hopper").not());

    hrl()
        .args(["--db", &db_path, "search", "ala", "--by", "name"])
        .assert()
        .success()
        .stdout(contains("Alan Turing"))
        .stdout(contains("1 employee(s)"));
}

#[test]
fn test_search_by_ssn_is_exact() {
    let db_path = init_db_with_payroll("search_ssn");

    hrl()
        .args(["--db", &db_path, "search", "222-22-2222", "--by", "ssn"])
        .assert()
        .success()
        .stdout(contains("Grace Hopper"))
        .stdout(contains("1 employee(s)"));

    // partial identity numbers never match
    hrl()
        .args(["--db", &db_path, "search", "222-22", "--by", "ssn"])
        .assert()
        .success()
        .stdout(contains("No employees match '222-22' by ssn."));
}

#[test]
fn test_search_by_id() {
    let db_path = init_db_with_payroll("search_id");

    hrl()
        .args(["--db", &db_path, "search", "3", "--by", "id"])
        .assert()
        .success()
        .stdout(contains("Alan Turing"));
}

#[test]
fn test_search_non_numeric_id_fails_validation() {
    let db_path = init_db_with_payroll("search_bad_id");

    hrl()
        .args(["--db", &db_path, "search", "abc", "--by", "id"])
        .assert()
        .failure()
        .stderr(contains("Invalid employee id: 'abc' is not a number"));
}

#[test]
fn test_search_empty_result_is_not_an_error() {
    let db_path = init_db_with_payroll("search_empty");

    hrl()
        .args(["--db", &db_path, "search", "nobody", "--by", "name"])
        .assert()
        .success()
        .stdout(contains("No employees match 'nobody' by name."))
        .stderr(contains("Error").not());
}

#[test]
fn test_search_logic_results_and_errors() {
    let db_path = setup_test_db("search_logic");
    let mut pool = open_pool(&db_path);

    DirectoryLogic::create(&mut pool, new_employee("Maria", "Rossi", "AAA-1", 40000.0))
        .expect("create");
    DirectoryLogic::create(&mut pool, new_employee("Mario", "Bianchi", "aaa-1", 41000.0))
        .expect("create");
    DirectoryLogic::create(&mut pool, new_employee("Luca", "Mariani", "BBB-2", 42000.0))
        .expect("create");

    // ordered by last name: Bianchi, Mariani, Rossi
    let found = SearchLogic::search(&mut pool, "  mari ", SearchField::Name).expect("search");
    let last: Vec<&str> = found.iter().map(|e| e.last_name.as_str()).collect();
    assert_eq!(last, vec!["Bianchi", "Mariani", "Rossi"]);

    // identity numbers are case-sensitive
    let found = SearchLogic::search(&mut pool, "AAA-1", SearchField::Ssn).expect("search");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].first_name, "Maria");

    let err = SearchLogic::search(&mut pool, "   ", SearchField::Name).unwrap_err();
    assert!(matches!(err, AppError::InvalidSearchTerm(_)));

    let err = SearchLogic::search(&mut pool, "12x", SearchField::Id).unwrap_err();
    assert!(matches!(err, AppError::InvalidEmployeeId(ref t) if t == "12x"));
}

#[test]
fn test_search_by_name_folds_accented_letters() {
    let db_path = setup_test_db("search_accented");
    let mut pool = open_pool(&db_path);

    DirectoryLogic::create(&mut pool, new_employee("Élodie", "Øster", "EO-1", 50000.0))
        .expect("create");
    DirectoryLogic::create(&mut pool, new_employee("Eloise", "Ostrom", "EO-2", 51000.0))
        .expect("create");

    for term in ["élodie", "ÉLODIE", "øster", "ØSTER", "lodie Ø"] {
        let found = SearchLogic::search(&mut pool, term, SearchField::Name).expect("search");
        let names: Vec<&str> = found.iter().map(|e| e.first_name.as_str()).collect();
        if term == "lodie Ø" {
            // the needle is matched against each name separately
            assert!(names.is_empty(), "{term}: {names:?}");
        } else {
            assert_eq!(names, vec!["Élodie"], "{term}");
        }
    }
}

#[test]
fn test_search_cli_matches_accented_names() {
    let db = setup_test_db("search_accented_cli");
    init(&db);
    add_employee(&db, "Åsa", "Ström", "555-55-5555", "Engineer", "R&D", "60000");

    hrl()
        .args(["--db", &db, "search", "åsa", "--by", "name"])
        .assert()
        .success()
        .stdout(contains("Ström"))
        .stdout(contains("1 employee(s)"));

    hrl()
        .args(["--db", &db, "search", "STRÖM", "--by", "name"])
        .assert()
        .success()
        .stdout(contains("Åsa"))
        .stdout(contains("1 employee(s)"));
}

#[test]
fn test_search_store_failure_is_an_error() {
    let db_path = setup_test_db("search_store_failure");
    let mut pool = open_pool(&db_path);

    pool.conn
        .execute_batch("DROP TABLE pay_statements; DROP TABLE employees;")
        .expect("drop");

    let err = SearchLogic::search(&mut pool, "x", SearchField::Name).unwrap_err();
    assert!(matches!(err, AppError::Db(_)));
}
