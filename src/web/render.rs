use axum::response::Html;

use crate::storage::{Book, SearchField};

use super::forms::{AddBookForm, SearchParams, MAX_PUBLICATION_YEAR, MIN_PUBLICATION_YEAR};

const APP_TITLE: &str = "📚 Personal Library Manager";
const APP_SUBTITLE: &str = "Manage your book collection easily!";

const STYLE: &str = r#"
body { font-family: sans-serif; background-color: #f0f8ff; margin: 0; display: flex; }
nav { background-color: #e0f2f7; min-height: 100vh; padding: 1rem; min-width: 12rem; }
nav a { display: block; padding: 0.4rem 0; color: #336699; }
nav a.active { font-weight: bold; }
main { padding: 1rem 2rem; flex: 1; }
h1, h2, h3 { color: #336699; }
label { display: block; margin-top: 0.6rem; }
button { background-color: #4CAF50; color: white; border: none; padding: 10px 20px; margin: 8px 2px; border-radius: 5px; cursor: pointer; }
table { border-collapse: collapse; background-color: white; border: 1px solid #ccc; }
th, td { border: 1px solid #ccc; padding: 4px 10px; text-align: left; }
.notice { padding: 0.6rem 1rem; border-radius: 5px; margin: 0.6rem 0; }
.notice.success { background-color: #dff0d8; }
.notice.info { background-color: #d9edf7; }
.notice.warning { background-color: #fcf8e3; }
.notice.error { background-color: #f2dede; }
"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavMode {
    Add,
    Library,
    Search,
}

impl NavMode {
    pub const ALL: [NavMode; 3] = [NavMode::Add, NavMode::Library, NavMode::Search];

    pub fn label(&self) -> &'static str {
        match self {
            NavMode::Add => "Add Book",
            NavMode::Library => "View Library",
            NavMode::Search => "Search Books",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            NavMode::Add => "/add",
            NavMode::Library => "/library",
            NavMode::Search => "/search",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    fn to_html(&self) -> String {
        format!(
            r#"<div class="notice {}" role="status">{}</div>"#,
            self.kind.class(),
            escape(&self.message)
        )
    }
}

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn notices_html(notices: &[Notice]) -> String {
    notices.iter().map(Notice::to_html).collect()
}

/// Wraps `body` in the shared layout. `active` highlights a navigation entry.
fn layout(active: Option<NavMode>, heading: &str, body: &str) -> Html<String> {
    let nav: String = NavMode::ALL
        .iter()
        .map(|mode| {
            let class = if Some(*mode) == active { " class=\"active\"" } else { "" };
            format!(
                r#"<a href="{}"{}>{}</a>"#,
                mode.path(),
                class,
                mode.label()
            )
        })
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<nav><h3>Navigation</h3>{nav}</nav>
<main>
<h1>{title}</h1>
<p>{APP_SUBTITLE}</p>
<h2>{heading}</h2>
{body}
</main>
</body>
</html>
"#,
        title = APP_TITLE,
        heading = escape(heading),
    ))
}

pub fn books_table(books: &[Book]) -> String {
    let rows: String = books
        .iter()
        .map(|book| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                book.id,
                escape(&book.title),
                escape(&book.author),
                escape(book.genre.as_deref().unwrap_or_default()),
                book.publication_year
                    .map(|y| y.to_string())
                    .unwrap_or_default(),
                escape(&book.isbn),
            )
        })
        .collect();

    format!(
        "<table>\n<thead><tr><th>ID</th><th>Title</th><th>Author</th><th>Genre</th><th>Publication Year</th><th>ISBN</th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>\n"
    )
}

fn text_input(name: &str, label: &str, value: &str) -> String {
    format!(
        r#"<label for="{name}">{label}</label><input type="text" id="{name}" name="{name}" value="{}">"#,
        escape(value)
    )
}

pub fn add_view(form: &AddBookForm, notices: &[Notice]) -> Html<String> {
    let body = format!(
        r#"<form method="post" action="/add">
{title}
{author}
{genre}
<label for="publication_year">Publication Year (optional):</label><input type="number" id="publication_year" name="publication_year" min="{MIN_PUBLICATION_YEAR}" max="{MAX_PUBLICATION_YEAR}" step="1" value="{year}">
{isbn}
<button type="submit">Add Book</button>
</form>
{notices}"#,
        title = text_input("title", "Title:", &form.title),
        author = text_input("author", "Author:", &form.author),
        genre = text_input("genre", "Genre (optional):", &form.genre),
        year = escape(&form.publication_year),
        isbn = text_input("isbn", "ISBN (Unique):", &form.isbn),
        notices = notices_html(notices),
    );
    layout(Some(NavMode::Add), "Add a New Book", &body)
}

/// Library table with the inline delete form. An empty library shows
/// `empty_message` instead of the table.
pub fn library_view(books: &[Book], notices: &[Notice], empty_message: &str) -> Html<String> {
    let mut body = notices_html(notices);
    if books.is_empty() {
        body.push_str(&Notice::info(empty_message).to_html());
    } else {
        body.push_str(&books_table(books));
        body.push_str(
            r#"<h3>Delete a Book</h3>
<form method="post" action="/library/delete">
<label for="id">Enter the ID of the book to delete:</label><input type="number" id="id" name="id" min="1" step="1" required>
<button type="submit">Delete Book</button>
</form>
"#,
        );
    }
    layout(Some(NavMode::Library), "Your Library", &body)
}

pub fn search_view(
    params: &SearchParams,
    selected: SearchField,
    results: Option<&[Book]>,
    notices: &[Notice],
) -> Html<String> {
    let options: String = SearchField::ALL
        .iter()
        .map(|field| {
            let selected_attr = if *field == selected { " selected" } else { "" };
            format!(r#"<option value="{field}"{selected_attr}>{field}</option>"#)
        })
        .collect();

    let mut body = format!(
        r#"<form method="get" action="/search">
<label for="q">Enter your search term:</label><input type="text" id="q" name="q" value="{}">
<label for="field">Search by:</label><select id="field" name="field">{options}</select>
<button type="submit">Search</button>
</form>
{}"#,
        escape(params.query()),
        notices_html(notices),
    );

    match results {
        Some([]) => body.push_str(
            &Notice::info("No books found matching your search criteria.").to_html(),
        ),
        Some(books) => {
            body.push_str("<h3>Search Results:</h3>\n");
            body.push_str(&books_table(books));
        }
        None => {}
    }

    layout(Some(NavMode::Search), "Search Your Library", &body)
}

pub fn error_page(heading: &str, message: &str) -> Html<String> {
    layout(None, heading, &Notice::error(message).to_html())
}
