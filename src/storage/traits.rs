use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub publication_year: Option<u16>,
    pub isbn: String,
}

/// A book that has not been stored yet and therefore has no id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub publication_year: Option<u16>,
    pub isbn: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchField {
    #[default]
    Title,
    Author,
    Genre,
    Isbn,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::Title,
        SearchField::Author,
        SearchField::Genre,
        SearchField::Isbn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Genre => "genre",
            SearchField::Isbn => "isbn",
        }
    }

    /// Column name in the `books` table. Never user supplied.
    pub(crate) fn column(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown search field: {0}")]
pub struct UnknownSearchField(pub String);

impl FromStr for SearchField {
    type Err = UnknownSearchField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownSearchField(s.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("a book with ISBN '{0}' already exists")]
    DuplicateIsbn(String),
    #[error("no book found with id {0}")]
    NotFound(i64),
    #[error("storage unavailable: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

pub trait Storage {
    fn add_book(&self, book: &NewBook) -> StorageResult<Book>;
    fn list_books(&self) -> StorageResult<Vec<Book>>;
    fn search_books(&self, query: &str, field: SearchField) -> StorageResult<Vec<Book>>;
    fn delete_book(&self, id: i64) -> StorageResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_field_parses_known_columns() {
        for field in SearchField::ALL {
            assert_eq!(field.as_str().parse::<SearchField>().unwrap(), field);
        }
    }

    #[test]
    fn search_field_rejects_unknown_column() {
        let err = "id; DROP TABLE books".parse::<SearchField>().unwrap_err();
        assert_eq!(err, UnknownSearchField("id; DROP TABLE books".to_string()));
    }
}
