pub mod migrations;
pub mod models;
pub mod queries;
pub mod store;

pub use store::Store;

use anyhow::{Result, anyhow};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

const READER_POOL_SIZE: usize = 4;

/// SQLite store with one writer connection and a small round-robin pool of
/// read-only connections. In-memory databases have no readers; every call
/// goes through the writer.
pub struct Database {
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    reader_idx: AtomicUsize,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let writer = Connection::open(path)?;

        // WAL mode for concurrent reads
        writer.pragma_update(None, "journal_mode", "WAL")?;
        writer.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&writer)?;

        let mut readers = Vec::with_capacity(READER_POOL_SIZE);
        for _ in 0..READER_POOL_SIZE {
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            readers.push(Mutex::new(conn));
        }

        info!(
            "Database opened at {} (1 writer + {} readers)",
            path.display(),
            READER_POOL_SIZE
        );
        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            reader_idx: AtomicUsize::new(0),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        info!("In-memory database opened");
        Ok(Self {
            writer: Mutex::new(conn),
            readers: Vec::new(),
            reader_idx: AtomicUsize::new(0),
        })
    }

    /// Run `f` on a reader connection. The connection is held only for the
    /// duration of the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        if self.readers.is_empty() {
            return self.with_conn_mut(f);
        }

        let idx = self.reader_idx.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[idx]
            .lock()
            .map_err(|e| anyhow!("Reader lock poisoned: {}", e))?;
        f(&conn)
    }

    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .writer
            .lock()
            .map_err(|e| anyhow!("Writer lock poisoned: {}", e))?;
        f(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_backed_reads_see_writer_commits() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("murmur.db")).unwrap();
        assert_eq!(db.readers.len(), READER_POOL_SIZE);

        let journal: String = db
            .with_conn(|conn| Ok(conn.query_row("PRAGMA journal_mode", [], |r| r.get(0))?))
            .unwrap();
        assert_eq!(journal.to_lowercase(), "wal");

        let alice = db.create_account("alice", "pass").unwrap();

        // Cycle past the pool size so every reader serves at least one read.
        for i in 0..(READER_POOL_SIZE as i64 * 2) {
            let msg = db
                .create_message(alice.account_id, &format!("draft {i}"), i)
                .unwrap();
            assert_eq!(db.get_message_by_id(msg.message_id).unwrap(), Some(msg.clone()));

            db.update_message_text(msg.message_id, &format!("final {i}"))
                .unwrap();
            let stored = db.get_message_by_id(msg.message_id).unwrap().unwrap();
            assert_eq!(stored.message_text, format!("final {i}"));

            if i % 2 == 0 {
                assert_eq!(db.delete_message(msg.message_id).unwrap(), 1);
                assert!(db.get_message_by_id(msg.message_id).unwrap().is_none());
            }
        }

        assert_eq!(db.get_messages_by_account(alice.account_id).unwrap().len(), READER_POOL_SIZE);
        assert_eq!(
            db.get_account_by_username("alice").unwrap().map(|a| a.account_id),
            Some(alice.account_id)
        );
    }

    #[test]
    fn reopening_keeps_data_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("murmur.db");

        let id = {
            let db = Database::open(&path).unwrap();
            db.create_account("bob", "pass").unwrap().account_id
        };

        let db = Database::open(&path).unwrap();
        assert_eq!(db.get_account_by_id(id).unwrap().unwrap().username, "bob");
    }
}
