use crate::db::{employees, migrate, pay_statements};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let total_emp = employees::count(&pool.conn)?;
    let active_emp: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM employees WHERE status = 'active'",
        [],
        |row| row.get(0),
    )?;
    let total_pay = pay_statements::count(&pool.conn)?;

    println!(
        "{}• Employees:{} {}{}{} ({} active)",
        CYAN, RESET, GREEN, total_emp, RESET, active_emp
    );
    println!(
        "{}• Pay statements:{} {}{}{}",
        CYAN, RESET, GREEN, total_pay, RESET
    );

    //
    // 3) PAY PERIOD RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row("SELECT MIN(period_start) FROM pay_statements", [], |row| {
            row.get(0)
        })
        .optional()?
        .flatten();
    let last: Option<String> = pool
        .conn
        .query_row("SELECT MAX(period_end) FROM pay_statements", [], |row| {
            row.get(0)
        })
        .optional()?
        .flatten();

    println!("{}• Pay periods:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    //
    // 4) SCHEMA
    //
    let pending = migrate::pending_migrations(&pool.conn)?;
    if pending.is_empty() {
        println!("{}• Schema:{} up to date", CYAN, RESET);
    } else {
        println!(
            "{}• Schema:{} {}{} pending migration(s){}",
            CYAN,
            RESET,
            YELLOW,
            pending.len(),
            RESET
        );
    }

    println!();
    Ok(())
}
