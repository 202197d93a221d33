//! SQLite connection wrapper handed explicitly to every operation.

use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, Result, Transaction};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the database file and enable foreign keys so that deleting an
    /// employee cascades to their pay statements.
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        register_fold(&conn)?;
        Ok(Self { conn })
    }

    /// Start a transaction. Dropping it without `commit()` rolls back.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        self.conn.transaction()
    }
}

/// `fold(text)`: Unicode lowercase, used by name matching. SQLite's
/// `lower()` leaves non-ASCII letters untouched.
fn register_fold(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "fold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
    )
}
