use rusqlite::{params, types::Type, Connection};
use std::path::Path;

use super::traits::{Book, NewBook, SearchField, Storage, StorageError, StorageResult};

const DB_SCHEMA_VERSION: i64 = 1;

const BOOK_COLUMNS: &str = "id, title, author, genre, publication_year, isbn";

#[derive(Clone, Debug)]
pub struct SqliteStorage {
    pub path: String,
}

fn map_book_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Book> {
    let publication_year = match row.get::<_, Option<i64>>(4)? {
        Some(year) => Some(year.try_into().map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(4, Type::Integer, Box::new(err))
        })?),
        None => None,
    };

    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        genre: row.get(3)?,
        publication_year,
        isbn: row.get(5)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Builds a `LIKE` pattern matching `query` anywhere in the column.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn db_insert_book(conn: &Connection, book: &NewBook) -> rusqlite::Result<Book> {
    conn.execute(
        "INSERT INTO books (title, author, genre, publication_year, isbn)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            book.title,
            book.author,
            book.genre,
            book.publication_year.map(i64::from),
            book.isbn
        ],
    )?;

    Ok(Book {
        id: conn.last_insert_rowid(),
        title: book.title.clone(),
        author: book.author.clone(),
        genre: book.genre.clone(),
        publication_year: book.publication_year,
        isbn: book.isbn.clone(),
    })
}

fn db_list_books(conn: &Connection) -> rusqlite::Result<Vec<Book>> {
    let mut stmt = conn.prepare(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id"))?;
    let rows = stmt
        .query_map([], map_book_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_search_books(
    conn: &Connection,
    query: &str,
    field: SearchField,
) -> rusqlite::Result<Vec<Book>> {
    let sql = format!(
        "SELECT {BOOK_COLUMNS} FROM books WHERE {} LIKE ?1 ESCAPE '\\' ORDER BY id",
        field.column()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![like_pattern(query)], map_book_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_delete_book(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM books WHERE id = ?1", params![id])
}

impl Storage for SqliteStorage {
    fn add_book(&self, book: &NewBook) -> StorageResult<Book> {
        self.with_conn(|conn| db_insert_book(conn, book))
            .map_err(|err| {
                if is_unique_violation(&err) {
                    StorageError::DuplicateIsbn(book.isbn.clone())
                } else {
                    StorageError::Sqlite(err)
                }
            })
    }

    fn list_books(&self) -> StorageResult<Vec<Book>> {
        Ok(self.with_conn(db_list_books)?)
    }

    fn search_books(&self, query: &str, field: SearchField) -> StorageResult<Vec<Book>> {
        Ok(self.with_conn(|conn| db_search_books(conn, query, field))?)
    }

    fn delete_book(&self, id: i64) -> StorageResult<()> {
        let deleted = self.with_conn(|conn| db_delete_book(conn, id))?;
        if deleted == 0 {
            return Err(StorageError::NotFound(id));
        }
        Ok(())
    }
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    /// Removes the database file together with its WAL side files.
    pub fn reset_all(&self) -> StorageResult<()> {
        for suffix in ["", "-wal", "-shm"] {
            let path = format!("{}{}", self.path, suffix);
            if Path::new(&path).exists() {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    pub fn init(&self) -> StorageResult<()> {
        self.with_conn(|_conn| Ok(()))?;
        Ok(())
    }

    /// Opens a connection for the duration of `f`. The connection is closed
    /// when it goes out of scope, whether `f` succeeds or not.
    fn with_conn<F, T>(&self, f: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;

        Self::migrate(&conn)?;
        f(&conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        if version == 0 {
            log::info!(
                "SQLite schema migration: {} -> {}",
                version,
                DB_SCHEMA_VERSION
            );
            // IF NOT EXISTS keeps catalogs created without a user_version.
            conn.execute_batch(
                r#"
            CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                genre TEXT,
                publication_year INTEGER,
                isbn TEXT UNIQUE
            );
            "#,
            )?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::ErrorCode::SchemaChanged as i32),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}
