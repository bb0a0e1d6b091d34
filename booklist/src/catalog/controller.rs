use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use tracing::debug;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
use crate::catalog::form::{validate_add_form, validate_edit_form, AddBookForm, EditBookForm};
use crate::catalog::view;
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/add", get(add_book_form).post(add_book))
        .route("/edit/:id", get(edit_book_form).post(edit_book))
        .route("/delete/:id", get(remove_book))
        .fallback(not_found)
        .with_state(state)
}

// path ids that are not integers can never match a book
fn parse_book_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}

pub async fn home(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let res = ListBooksCommand::new(state.catalog.clone())
        .execute(ListBooksCommandRequest::new(true)).await?;
    Ok(Html(view::render_index(&res.books)))
}

pub async fn add_book_form() -> Html<String> {
    Html(view::render_add(&AddBookForm::default(), None))
}

pub async fn add_book(
    State(state): State<AppState>,
    form: Result<Form<AddBookForm>, FormRejection>) -> Result<Response, ServerError> {
    let Form(form) = form?;
    let result = validate_add_form(&form);
    let fields = match result.fields.clone() {
        Some(fields) if result.ok => fields,
        _ => {
            debug!("add form rejected {:?}", result.errors);
            return Ok(Html(view::render_add(&form, Some(&result))).into_response());
        }
    };
    let _ = AddBookCommand::new(state.catalog.clone())
        .execute(AddBookCommandRequest::from(fields)).await?;
    Ok(Redirect::to("/").into_response())
}

pub async fn edit_book_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>) -> Result<Html<String>, ServerError> {
    let book_id = parse_book_id(raw_id.as_str()).ok_or_else(ServerError::not_found)?;
    let res = GetBookCommand::new(state.catalog.clone())
        .execute(GetBookCommandRequest::new(book_id)).await?;
    Ok(Html(view::render_edit(book_id, &EditBookForm::from(&res.book), None)))
}

pub async fn edit_book(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    form: Result<Form<EditBookForm>, FormRejection>) -> Result<Response, ServerError> {
    let book_id = parse_book_id(raw_id.as_str()).ok_or_else(ServerError::not_found)?;
    let _ = GetBookCommand::new(state.catalog.clone())
        .execute(GetBookCommandRequest::new(book_id)).await?;
    let Form(form) = form?;

    let result = validate_edit_form(&form);
    let fields = match result.fields.clone() {
        Some(fields) if result.ok => fields,
        _ => {
            debug!("edit form for {} rejected {:?}", book_id, result.errors);
            return Ok(Html(view::render_edit(book_id, &form, Some(&result))).into_response());
        }
    };
    let _ = UpdateBookCommand::new(state.catalog.clone())
        .execute(UpdateBookCommandRequest::from_fields(book_id, fields)).await?;
    Ok(Redirect::to("/").into_response())
}

pub async fn remove_book(
    State(state): State<AppState>,
    Path(raw_id): Path<String>) -> Result<Redirect, ServerError> {
    match parse_book_id(raw_id.as_str()) {
        Some(book_id) => {
            let _ = RemoveBookCommand::new(state.catalog.clone())
                .execute(RemoveBookCommandRequest::new(book_id)).await?;
        }
        None => {
            debug!("ignoring delete of {:?}", raw_id);
        }
    }
    Ok(Redirect::to("/"))
}

pub async fn not_found() -> ServerError {
    ServerError::new(axum::http::StatusCode::NOT_FOUND, "Page not found.")
}
