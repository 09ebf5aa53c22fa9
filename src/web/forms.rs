use serde::Deserialize;
use thiserror::Error;

use crate::storage::{NewBook, SearchField};

pub const MIN_PUBLICATION_YEAR: u16 = 0;
pub const MAX_PUBLICATION_YEAR: u16 = 2100;

/// Validation failures reported inline; none of them reach storage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Title, Author, and ISBN are required fields.")]
    MissingRequired,
    #[error("Publication year must be a whole number between 0 and 2100.")]
    InvalidYear,
    #[error("Please enter a search term.")]
    EmptyQuery,
    #[error("Unknown search field '{0}'.")]
    UnknownField(String),
    #[error("Please enter a valid book ID.")]
    InvalidId,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddBookForm {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publication_year: String,
    pub isbn: String,
}

impl AddBookForm {
    pub fn validate(&self) -> Result<NewBook, FormError> {
        let title = self.title.trim();
        let author = self.author.trim();
        let isbn = self.isbn.trim();
        if title.is_empty() || author.is_empty() || isbn.is_empty() {
            return Err(FormError::MissingRequired);
        }

        let genre = Some(self.genre.trim())
            .filter(|g| !g.is_empty())
            .map(str::to_string);

        Ok(NewBook {
            title: title.to_string(),
            author: author.to_string(),
            genre,
            publication_year: parse_year(&self.publication_year)?,
            isbn: isbn.to_string(),
        })
    }
}

fn parse_year(raw: &str) -> Result<Option<u16>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let year: u16 = raw.parse().map_err(|_| FormError::InvalidYear)?;
    if !(MIN_PUBLICATION_YEAR..=MAX_PUBLICATION_YEAR).contains(&year) {
        return Err(FormError::InvalidYear);
    }
    Ok(Some(year))
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteBookForm {
    pub id: String,
}

impl DeleteBookForm {
    pub fn book_id(&self) -> Result<i64, FormError> {
        match self.id.trim().parse::<i64>() {
            Ok(id) if id >= 1 => Ok(id),
            _ => Err(FormError::InvalidId),
        }
    }
}

/// Query string of the search view. `q` is absent until the form is submitted.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub field: Option<String>,
}

impl SearchParams {
    pub fn submitted(&self) -> bool {
        self.q.is_some()
    }

    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }

    pub fn field(&self) -> Result<SearchField, FormError> {
        match self.field.as_deref() {
            None | Some("") => Ok(SearchField::default()),
            Some(raw) => raw
                .parse()
                .map_err(|_| FormError::UnknownField(raw.to_string())),
        }
    }

    pub fn validate(&self) -> Result<(String, SearchField), FormError> {
        let field = self.field()?;
        let query = self.query().trim();
        if query.is_empty() {
            return Err(FormError::EmptyQuery);
        }
        Ok((query.to_string(), field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, author: &str, isbn: &str) -> AddBookForm {
        AddBookForm {
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn add_form_requires_title_author_and_isbn() {
        assert_eq!(
            form("", "Herbert", "111").validate(),
            Err(FormError::MissingRequired)
        );
        assert_eq!(
            form("Dune", "  ", "111").validate(),
            Err(FormError::MissingRequired)
        );
        assert_eq!(
            form("Dune", "Herbert", "").validate(),
            Err(FormError::MissingRequired)
        );
    }

    #[test]
    fn add_form_trims_and_drops_empty_optionals() {
        let book = form(" Dune ", "Herbert", " 111 ").validate().unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.isbn, "111");
        assert_eq!(book.genre, None);
        assert_eq!(book.publication_year, None);
    }

    #[test]
    fn add_form_accepts_year_bounds() {
        let mut f = form("Dune", "Herbert", "111");
        f.publication_year = "0".to_string();
        assert_eq!(f.validate().unwrap().publication_year, Some(0));
        f.publication_year = "2100".to_string();
        assert_eq!(f.validate().unwrap().publication_year, Some(2100));
    }

    #[test]
    fn add_form_rejects_bad_years() {
        let mut f = form("Dune", "Herbert", "111");
        for raw in ["2101", "-1", "1965.5", "soon"] {
            f.publication_year = raw.to_string();
            assert_eq!(f.validate(), Err(FormError::InvalidYear), "year {raw}");
        }
    }

    #[test]
    fn delete_form_requires_positive_integer() {
        let id = |raw: &str| DeleteBookForm { id: raw.to_string() }.book_id();
        assert_eq!(id("7"), Ok(7));
        assert_eq!(id(" 12 "), Ok(12));
        assert_eq!(id("0"), Err(FormError::InvalidId));
        assert_eq!(id("abc"), Err(FormError::InvalidId));
        assert_eq!(id(""), Err(FormError::InvalidId));
    }

    #[test]
    fn search_params_default_to_title_and_require_query() {
        let params = SearchParams {
            q: Some("   ".to_string()),
            field: None,
        };
        assert!(params.submitted());
        assert_eq!(params.validate(), Err(FormError::EmptyQuery));

        let params = SearchParams {
            q: Some(" Tolkien ".to_string()),
            field: Some("author".to_string()),
        };
        assert_eq!(
            params.validate(),
            Ok(("Tolkien".to_string(), SearchField::Author))
        );

        let params = SearchParams {
            q: Some("x".to_string()),
            field: Some("publisher".to_string()),
        };
        assert_eq!(
            params.validate(),
            Err(FormError::UnknownField("publisher".to_string()))
        );
    }
}
