use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};

use crate::storage::{SearchField, Storage, StorageError};

use super::{
    forms::{AddBookForm, DeleteBookForm, SearchParams},
    models::HealthResponse,
    render::{self, NavMode, Notice},
    AppState,
};

const LIBRARY_EMPTY: &str = "Your library is currently empty. Add some books!";
const LIBRARY_NOW_EMPTY: &str = "Your library is now empty.";

pub async fn root() -> Redirect {
    Redirect::to(NavMode::Add.path())
}

pub async fn health<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs,
        }),
    )
}

pub async fn add_form() -> Html<String> {
    render::add_view(&AddBookForm::default(), &[])
}

pub async fn add_book<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Form(form): Form<AddBookForm>,
) -> Response {
    let book = match form.validate() {
        Ok(book) => book,
        Err(err) => {
            log::debug!("Rejected add form: {}", err);
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                render::add_view(&form, &[Notice::error(err.to_string())]),
            )
                .into_response();
        }
    };

    match state.storage.add_book(&book) {
        Ok(added) => {
            log::info!(
                "📗 Added book {} '{}' (isbn {})",
                added.id,
                added.title,
                added.isbn
            );
            let message = format!(
                "Book '{}' by {} added successfully!",
                added.title, added.author
            );
            render::add_view(&AddBookForm::default(), &[Notice::success(message)]).into_response()
        }
        Err(StorageError::DuplicateIsbn(isbn)) => {
            log::warn!("Rejected duplicate ISBN {}", isbn);
            let message = format!("A book with ISBN '{}' already exists.", isbn);
            (
                StatusCode::CONFLICT,
                render::add_view(&form, &[Notice::error(message)]),
            )
                .into_response()
        }
        Err(err) => storage_failure("add book", err),
    }
}

pub async fn library<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Response {
    match state.storage.list_books() {
        Ok(books) => render::library_view(&books, &[], LIBRARY_EMPTY).into_response(),
        Err(err) => storage_failure("list books", err),
    }
}

/// Deletes by id, then renders the refreshed library whatever the outcome.
pub async fn delete_book<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Form(form): Form<DeleteBookForm>,
) -> Response {
    let mut empty_message = LIBRARY_EMPTY;
    let (status, notice) = match form.book_id() {
        Err(err) => (StatusCode::UNPROCESSABLE_ENTITY, Notice::error(err.to_string())),
        Ok(id) => match state.storage.delete_book(id) {
            Ok(()) => {
                log::info!("🗑️ Deleted book {}", id);
                empty_message = LIBRARY_NOW_EMPTY;
                (
                    StatusCode::OK,
                    Notice::warning(format!("Book with ID {} deleted.", id)),
                )
            }
            Err(StorageError::NotFound(id)) => {
                log::warn!("Delete requested for missing book {}", id);
                (
                    StatusCode::NOT_FOUND,
                    Notice::warning(format!(
                        "No book found with ID {}. Please check the ID and try again.",
                        id
                    )),
                )
            }
            Err(err) => return storage_failure("delete book", err),
        },
    };

    match state.storage.list_books() {
        Ok(books) => (
            status,
            render::library_view(&books, &[notice], empty_message),
        )
            .into_response(),
        Err(err) => storage_failure("list books", err),
    }
}

pub async fn search<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let selected = match params.field() {
        Ok(field) => field,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                render::search_view(
                    &params,
                    SearchField::default(),
                    None,
                    &[Notice::error(err.to_string())],
                ),
            )
                .into_response();
        }
    };

    if !params.submitted() {
        return render::search_view(&params, selected, None, &[]).into_response();
    }

    let (query, field) = match params.validate() {
        Ok(valid) => valid,
        Err(err) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                render::search_view(&params, selected, None, &[Notice::warning(err.to_string())]),
            )
                .into_response();
        }
    };

    match state.storage.search_books(&query, field) {
        Ok(books) => {
            log::debug!("Search {}~'{}' matched {} books", field, query, books.len());
            render::search_view(&params, field, Some(&books), &[]).into_response()
        }
        Err(err) => storage_failure("search books", err),
    }
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        render::error_page("Page Not Found", "Use the navigation to pick a view."),
    )
}

fn storage_failure(action: &str, err: StorageError) -> Response {
    log::error!("Failed to {}: {:?}", action, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        render::error_page("Storage Unavailable", &err.to_string()),
    )
        .into_response()
}
