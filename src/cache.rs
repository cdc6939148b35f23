use crate::error::{RepostatsError, Result};
use crate::model::{CommitRecord, FileChange, SCHEMA_VERSION};
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::Path;

/// SQLite store of computed commit records, keyed by commit id.
///
/// A commit's content never changes, so a cached record is reused as-is.
pub struct Cache {
    conn: Connection,
}

impl Cache {
    pub fn new<CP: AsRef<Path>, RP: AsRef<Path>>(cache_path: Option<CP>, repo_path: RP) -> Result<Self> {
        let cache_dir = match cache_path {
            Some(path) => path.as_ref().to_path_buf(),
            None => repo_path.as_ref().join(".repostats"),
        };
        std::fs::create_dir_all(&cache_dir)?;
        let conn = Connection::open(cache_dir.join("cache.db"))?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let mut cache = Self { conn };
        cache.initialize()?;
        Ok(cache)
    }

    fn initialize(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS commits (
                id TEXT PRIMARY KEY,
                author_name TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS file_changes (
                commit_id TEXT NOT NULL,
                ordinal INTEGER NOT NULL,
                path TEXT NOT NULL,
                insertions INTEGER,
                deletions INTEGER,
                PRIMARY KEY (commit_id, ordinal),
                FOREIGN KEY (commit_id) REFERENCES commits(id)
            );
            CREATE INDEX IF NOT EXISTS idx_commits_timestamp ON commits(timestamp);
            ",
        )?;
        self.check_schema_version()?;
        Ok(())
    }

    fn check_schema_version(&mut self) -> Result<()> {
        let user_version: i64 = self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?;

        if user_version == 0 {
            let set_stmt = format!("PRAGMA user_version = {SCHEMA_VERSION};");
            self.conn.execute_batch(&set_stmt)?;
        } else if user_version != SCHEMA_VERSION as i64 {
            return Err(RepostatsError::Cache(format!(
                "Schema version mismatch: expected {}, found {}",
                SCHEMA_VERSION, user_version
            )));
        }

        Ok(())
    }

    /// Loads every cached record, keyed by commit id.
    pub fn load_records(&self) -> Result<HashMap<String, CommitRecord>> {
        let mut changes: HashMap<String, Vec<FileChange>> = HashMap::new();
        {
            let mut stmt = self.conn.prepare(
                "SELECT commit_id, path, insertions, deletions
                 FROM file_changes
                 ORDER BY commit_id, ordinal",
            )?;
            let rows = stmt.query_map([], |row| {
                let commit_id: String = row.get(0)?;
                let path: String = row.get(1)?;
                let insertions: Option<i64> = row.get(2)?;
                let deletions: Option<i64> = row.get(3)?;
                let change = match (insertions, deletions) {
                    (Some(i), Some(d)) => FileChange::text(path, i.max(0) as u64, d.max(0) as u64),
                    _ => FileChange::binary(path),
                };
                Ok((commit_id, change))
            })?;
            for row in rows {
                let (commit_id, change) = row?;
                changes.entry(commit_id).or_default().push(change);
            }
        }

        let mut stmt = self
            .conn
            .prepare("SELECT id, author_name, timestamp FROM commits")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut records = HashMap::new();
        for row in rows {
            let (id, author_name, timestamp) = row?;
            let files = changes.remove(&id).unwrap_or_default();
            let record = CommitRecord::new(id.clone(), author_name, timestamp, Some(files), None)?;
            records.insert(id, record);
        }
        Ok(records)
    }

    pub fn store_records(&mut self, records: &[CommitRecord]) -> Result<()> {
        let tx = self.conn.transaction()?;

        let mut insert_commit_stmt = tx.prepare(
            "INSERT OR REPLACE INTO commits (id, author_name, timestamp) VALUES (?, ?, ?)",
        )?;
        let mut delete_changes_stmt = tx.prepare("DELETE FROM file_changes WHERE commit_id = ?")?;
        let mut insert_change_stmt = tx.prepare(
            "INSERT INTO file_changes (commit_id, ordinal, path, insertions, deletions)
             VALUES (?, ?, ?, ?, ?)",
        )?;

        for record in records {
            insert_commit_stmt.execute(params![record.id, record.author_name, record.timestamp])?;
            delete_changes_stmt.execute(params![record.id])?;

            for (ordinal, change) in record.file_changes.iter().flatten().enumerate() {
                let (insertions, deletions) = match change {
                    FileChange::Text { insertions, deletions, .. } => {
                        (Some(*insertions as i64), Some(*deletions as i64))
                    }
                    FileChange::Binary { .. } => (None, None),
                };
                insert_change_stmt.execute(params![
                    record.id,
                    ordinal as i64,
                    change.path(),
                    insertions,
                    deletions
                ])?;
            }
        }

        drop(insert_commit_stmt);
        drop(delete_changes_stmt);
        drop(insert_change_stmt);

        tx.commit()?;
        tracing::debug!(stored = records.len(), "cached commit records");
        Ok(())
    }
}
