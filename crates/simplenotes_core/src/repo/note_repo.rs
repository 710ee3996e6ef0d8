//! Note/tag repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide note persistence APIs over the `notes`/`tags`/`note_tags` schema.
//! - Own tag-link replacement (`set_note_tags`) with atomic semantics.
//! - Own stale-tag reclamation: a tag with zero associations is deleted
//!   permanently.
//!
//! # Invariants
//! - `set_note_tags` replaces the whole tag set in a single transaction.
//! - Callers pass tag names already normalized (lowercase, trimmed);
//!   duplicate names collapse at association time via the `tags.name`
//!   uniqueness constraint.
//! - Deletes are hard deletes; join rows go via `ON DELETE CASCADE`.
//! - Reclamation is idempotent and never removes a tag that still has at
//!   least one association when the pass executes.

use crate::db::DbError;
use crate::model::note::{Note, NoteId};
use chrono::{DateTime, Utc};
use log::info;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const NOTES_DEFAULT_LIMIT: u32 = 30;
const NOTES_LIMIT_MAX: u32 = 100;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(NoteId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note CRUD and tag lifecycle operations.
pub trait NoteRepository {
    /// Creates one note and returns its stable id.
    fn create_note(&self, body: &str, date: DateTime<Utc>) -> RepoResult<NoteId>;
    /// Replaces body and date wholesale.
    fn update_note(&self, id: NoteId, body: &str, date: DateTime<Utc>) -> RepoResult<()>;
    /// Gets one note by id, tags included.
    fn find_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Hard-deletes one note; its tag associations go with it.
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
    /// Lists notes newest date first.
    fn list_recent(&self, limit: u32) -> RepoResult<Vec<Note>>;
    /// Replaces all tags for the given note in one transaction.
    fn set_note_tags(&mut self, id: NoteId, names: &[String]) -> RepoResult<()>;
    /// Deletes every tag with zero note associations; returns the count.
    fn reclaim_stale_tags(&self) -> RepoResult<usize>;
    /// Returns all known tag names sorted by name.
    fn list_tags(&self) -> RepoResult<Vec<String>>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, body: &str, date: DateTime<Utc>) -> RepoResult<NoteId> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO notes (id, body, date) VALUES (?1, ?2, ?3);",
            params![id.to_string(), body, date.timestamp_millis()],
        )?;
        Ok(id)
    }

    fn update_note(&self, id: NoteId, body: &str, date: DateTime<Utc>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                body = ?2,
                date = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id.to_string(), body, date.timestamp_millis()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn find_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, body, date
             FROM notes
             WHERE id = ?1;",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            let tags = load_tags_for_note(self.conn, &id_text)?;
            return Ok(Some(Note {
                id: parse_note_id(&id_text)?,
                body: row.get("body")?,
                date: parse_epoch_ms(row.get("date")?)?,
                tags,
            }));
        }

        Ok(None)
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn list_recent(&self, limit: u32) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, body, date
             FROM notes
             ORDER BY date DESC, id ASC
             LIMIT ?1;",
        )?;

        let mut rows = stmt.query([i64::from(limit)])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            let tags = load_tags_for_note(self.conn, &id_text)?;
            notes.push(Note {
                id: parse_note_id(&id_text)?,
                body: row.get("body")?,
                date: parse_epoch_ms(row.get("date")?)?,
                tags,
            });
        }

        Ok(notes)
    }

    fn set_note_tags(&mut self, id: NoteId, names: &[String]) -> RepoResult<()> {
        let id_text = id.to_string();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !note_exists_in_tx(&tx, id_text.as_str())? {
            return Err(RepoError::NotFound(id));
        }

        tx.execute(
            "DELETE FROM note_tags WHERE note_id = ?1;",
            [id_text.as_str()],
        )?;

        for name in names {
            tx.execute(
                "INSERT OR IGNORE INTO tags (name) VALUES (?1);",
                [name.as_str()],
            )?;
            tx.execute(
                "INSERT OR IGNORE INTO note_tags (note_id, tag_id)
                 SELECT ?1, id
                 FROM tags
                 WHERE name = ?2;",
                params![id_text.as_str(), name.as_str()],
            )?;
        }

        tx.execute(
            "UPDATE notes
             SET updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            [id_text.as_str()],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn reclaim_stale_tags(&self) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM tags
             WHERE id NOT IN (
                SELECT DISTINCT tag_id FROM note_tags
             );",
            [],
        )?;

        if removed > 0 {
            info!("event=tag_reclaim module=repo status=ok removed={removed}");
        }

        Ok(removed)
    }

    fn list_tags(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM tags ORDER BY name ASC;")?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            let name: String = row.get("name")?;
            tags.push(name);
        }
        Ok(tags)
    }
}

/// Normalizes a list limit: 30 by default, capped at 100.
pub fn normalize_list_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) => NOTES_DEFAULT_LIMIT,
        Some(value) if value > NOTES_LIMIT_MAX => NOTES_LIMIT_MAX,
        Some(value) => value,
        None => NOTES_DEFAULT_LIMIT,
    }
}

fn parse_note_id(value: &str) -> RepoResult<NoteId> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in notes.id")))
}

fn parse_epoch_ms(value: i64) -> RepoResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid epoch value `{value}` in notes.date"))
    })
}

fn load_tags_for_note(conn: &Connection, note_id: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT t.name
         FROM note_tags nt
         INNER JOIN tags t ON t.id = nt.tag_id
         WHERE nt.note_id = ?1
         ORDER BY t.name ASC;",
    )?;
    let mut rows = stmt.query([note_id])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(0)?;
        tags.push(name);
    }
    Ok(tags)
}

fn note_exists_in_tx(tx: &Transaction<'_>, note_id: &str) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM notes WHERE id = ?1
        );",
        [note_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    for table in ["notes", "tags", "note_tags"] {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::InvalidData(format!(
                "required table `{table}` is missing; migrations not applied"
            )));
        }
    }
    Ok(())
}
