//! Transaction management utilities.
//!
//! Every multi-table state change runs through [`Database::immediate`], which
//! takes the database write lock up front (`BEGIN IMMEDIATE`). Writers are
//! therefore serialized and always touch slots, then inventory, then
//! reservations in the same order. Reads that span several tables go through
//! [`Database::snapshot`] so they see one committed state.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::connection::Database;

fn run_immediate<T>(
    conn: &mut Connection,
    f: impl FnOnce(&Transaction<'_>) -> Result<T>,
) -> Result<T> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let value = f(&tx)?;
    tx.commit()?;
    Ok(value)
}

impl Database {
    /// Runs `f` inside a single IMMEDIATE transaction.
    ///
    /// The transaction commits only if `f` succeeds; any error (or a panic)
    /// drops it, which rolls every statement back. Lock acquisition is
    /// bounded by the configured busy timeout; exhausting it yields
    /// [`Error::LockTimeout`].
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or a database error if the
    /// transaction cannot be started or committed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use slotbook::database::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/slotbook.db")).unwrap();
    /// let doses = db
    ///     .immediate(|tx| Database::increment_doses(tx, &"pfizer".parse().unwrap(), 5))
    ///     .unwrap();
    /// ```
    pub fn immediate<T>(&mut self, f: impl FnOnce(&Transaction<'_>) -> Result<T>) -> Result<T> {
        let seconds = self.busy_timeout().as_secs();
        run_immediate(&mut self.conn, f).map_err(|err| {
            if err.is_lock_contention() {
                Error::LockTimeout { seconds }
            } else {
                err
            }
        })
    }

    /// Runs the reads in `f` against one consistent view of the database.
    ///
    /// The view is fixed by the first statement `f` executes; commits made by
    /// other connections after that point are not visible until `f` returns.
    /// No write lock is taken, so this never waits on a booking.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or a database error if the read
    /// transaction cannot be started.
    pub fn snapshot<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;
    use crate::database::DatabaseConfig;
    use std::time::Duration;
    use tempfile::tempdir;

    fn item_count(db: &Database) -> i64 {
        db.connection()
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_immediate_commits_on_success() {
        let mut db = create_test_database();
        db.immediate(|tx| {
            tx.execute("INSERT INTO items (name, doses) VALUES ('x', 1)", [])?;
            Ok(())
        })
        .unwrap();
        assert_eq!(item_count(&db), 1);
    }

    #[test]
    fn test_immediate_rolls_back_on_error() {
        let mut db = create_test_database();
        let result: Result<()> = db.immediate(|tx| {
            tx.execute("INSERT INTO items (name, doses) VALUES ('x', 1)", [])?;
            Err(Error::NotFound {
                resource: "anything".into(),
            })
        });
        assert!(matches!(result, Err(Error::NotFound { .. })));
        assert_eq!(item_count(&db), 0);
    }

    #[test]
    fn test_immediate_times_out_while_another_writer_holds_lock() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let mut holder = Database::open(DatabaseConfig::new(&path)).unwrap();
        let mut waiter = Database::open(
            DatabaseConfig::new(&path).with_busy_timeout(Duration::from_millis(50)),
        )
        .unwrap();

        let tx = holder
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .unwrap();

        let result = waiter.immediate(|_| Ok(()));
        assert!(matches!(result, Err(Error::LockTimeout { .. })));

        drop(tx);
        waiter.immediate(|_| Ok(())).unwrap();
    }

    #[test]
    fn test_snapshot_ignores_commits_made_while_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let reader = Database::open(DatabaseConfig::new(&path)).unwrap();
        let mut writer = Database::open(DatabaseConfig::new(&path)).unwrap();

        let (before, during) = reader
            .snapshot(|conn| {
                let count = |conn: &Connection| -> Result<i64> {
                    Ok(conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?)
                };
                let before = count(conn)?;
                writer.add_doses(&"moderna".parse().unwrap(), 3)?;
                Ok((before, count(conn)?))
            })
            .unwrap();

        assert_eq!(before, 0);
        assert_eq!(during, 0);
        assert_eq!(item_count(&reader), 1);
    }
}
