use std::sync::Arc;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use crate::catalog::domain::CatalogService;
use crate::catalog::view;
use crate::core::command::CommandError;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogService>) -> AppState {
        AppState {
            catalog,
        }
    }
}

// ServerError carries the status and a user-facing message; internal detail is only logged.
#[derive(Debug)]
pub struct ServerError {
    pub status: StatusCode,
    pub message: String,
}

impl ServerError {
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    pub fn not_found() -> Self {
        ServerError::new(StatusCode::NOT_FOUND, "Book not found.")
    }
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::NotFound { .. } => {
                tracing::info!("not found {:?}", err);
                ServerError::not_found()
            }
            CommandError::Validation { .. } => {
                tracing::info!("rejected request {:?}", err);
                ServerError::new(StatusCode::BAD_REQUEST, "The submitted book is not valid.")
            }
            CommandError::DuplicateKey { .. } => {
                tracing::error!("conflicting write {:?}", err);
                ServerError::new(StatusCode::CONFLICT, "The book could not be saved.")
            }
            CommandError::Database { .. }
            | CommandError::Runtime { .. }
            | CommandError::Serialization { .. } => {
                tracing::error!("request failed {:?}", err);
                ServerError::new(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.")
            }
        }
    }
}

// body decoding failures never reach the form validator
impl From<FormRejection> for ServerError {
    fn from(err: FormRejection) -> Self {
        tracing::info!("unreadable form {} {}", err.status(), err.body_text());
        ServerError::new(StatusCode::BAD_REQUEST, "The submitted form could not be read.")
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status, Html(view::render_error(self.status, self.message.as_str()))).into_response()
    }
}
