use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// One schema step. Applied steps are recorded in the `log` table as
/// `migration_applied` rows whose target is the version string.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_employees",
        description: "Created employees table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS employees (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name  TEXT NOT NULL,
            last_name   TEXT NOT NULL,
            ssn         TEXT NOT NULL UNIQUE,
            email       TEXT NOT NULL UNIQUE,
            phone       TEXT,
            hire_date   TEXT NOT NULL,
            job_title   TEXT NOT NULL,
            division    TEXT NOT NULL,
            salary      REAL NOT NULL CHECK(salary >= 0),
            status      TEXT NOT NULL DEFAULT 'active' CHECK(status IN ('active','inactive')),
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
            updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
        );
        "#,
    },
    Migration {
        version: "20250301_0002_create_pay_statements",
        description: "Created pay_statements table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS pay_statements (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id   INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            period_start  TEXT NOT NULL,
            period_end    TEXT NOT NULL,
            gross_pay     REAL NOT NULL,
            deductions    REAL NOT NULL DEFAULT 0,
            net_pay       REAL NOT NULL,
            created_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
        );

        CREATE INDEX IF NOT EXISTS idx_pay_statements_employee ON pay_statements(employee_id);
        "#,
    },
    Migration {
        version: "20250312_0003_employees_updated_at_trigger",
        description: "Refresh employees.updated_at on every update",
        sql: r#"
        CREATE TRIGGER IF NOT EXISTS trg_employees_updated_at
        AFTER UPDATE ON employees
        FOR EACH ROW
        WHEN NEW.updated_at IS OLD.updated_at
        BEGIN
            UPDATE employees
            SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ','now')
            WHERE id = NEW.id;
        END;
        "#,
    },
    Migration {
        version: "20250405_0004_search_and_report_indexes",
        description: "Added indexes for salary ranges, name search and monthly reports",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_employees_salary ON employees(salary);
        CREATE INDEX IF NOT EXISTS idx_employees_name ON employees(last_name, first_name);
        CREATE INDEX IF NOT EXISTS idx_pay_statements_period ON pay_statements(period_start, period_end);
        "#,
    },
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Check if the `employees` table exists.
fn employees_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='employees'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Versions not yet recorded in the log table.
pub fn pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    tx.commit()?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let pending = pending_migrations(conn)?;
    if pending.is_empty() {
        return Ok(());
    }

    // Upgrading a database that already holds data → safety copy first
    if employees_table_exists(conn)? {
        let db_path: String = conn
            .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
            .unwrap_or_default();

        if db_path.is_empty() {
            warning("Could not determine DB path, backup skipped.");
        } else {
            warning("Existing schema detected, creating safety backup before migration...");
            let zip = crate::core::backup::backup_before_migration(&db_path)?;
            success(format!("📦 Backup created: {}", zip.display()));
        }
    }

    for m in MIGRATIONS.iter().filter(|m| pending.contains(&m.version)) {
        apply(conn, m)?;
    }

    Ok(())
}
