use std::collections::BTreeMap;
use serde::Deserialize;
use crate::books::domain::{is_valid_rating, round_rating, Book, MAX_TEXT_LEN};
use crate::books::dto::BookDto;
use crate::core::library::{LibraryError, LibraryResult};

pub const REQUIRED_MSG: &str = "This field is required.";
pub const NOT_DECIMAL_MSG: &str = "Not a valid decimal value.";
pub const RATING_RANGE_MSG: &str = "Number must be between 0 and 10.";
pub const TOO_LONG_MSG: &str = "Field cannot be longer than 250 characters.";

// Form bodies keep every field as text so that a missing or malformed value
// becomes a field error instead of an extractor rejection.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct AddBookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub rating: String,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct EditBookForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub rating: String,
}

impl From<&BookDto> for EditBookForm {
    fn from(book: &BookDto) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.to_string(),
            author: book.author.to_string(),
            rating: book.display_rating(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub rating: f64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationResult {
    pub ok: bool,
    pub errors: BTreeMap<String, String>,
    pub fields: Option<BookFields>,
}

impl ValidationResult {
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

pub fn validate_add_form(form: &AddBookForm) -> ValidationResult {
    validate_fields(form.title.as_str(), form.author.as_str(), form.rating.as_str())
}

// id is carried through untouched, the catalog decides whether it exists
pub fn validate_edit_form(form: &EditBookForm) -> ValidationResult {
    validate_fields(form.title.as_str(), form.author.as_str(), form.rating.as_str())
}

fn validate_fields(title: &str, author: &str, rating: &str) -> ValidationResult {
    let mut errors = BTreeMap::new();
    let title = check_text("title", title, &mut errors);
    let author = check_text("author", author, &mut errors);
    let rating = check_rating(rating, &mut errors);

    match (title, author, rating) {
        (Some(title), Some(author), Some(rating)) if errors.is_empty() => ValidationResult {
            ok: true,
            errors,
            fields: Some(BookFields { title, author, rating }),
        },
        _ => ValidationResult {
            ok: false,
            errors,
            fields: None,
        },
    }
}

fn check_text(field: &str, value: &str, errors: &mut BTreeMap<String, String>) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field.to_string(), REQUIRED_MSG.to_string());
        None
    } else if value.chars().count() > MAX_TEXT_LEN {
        errors.insert(field.to_string(), TOO_LONG_MSG.to_string());
        None
    } else {
        Some(value.to_string())
    }
}

fn check_rating(value: &str, errors: &mut BTreeMap<String, String>) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        errors.insert("rating".to_string(), REQUIRED_MSG.to_string());
        return None;
    }
    match value.parse::<f64>() {
        Ok(rating) if is_valid_rating(rating) => Some(round_rating(rating)),
        Ok(_) => {
            errors.insert("rating".to_string(), RATING_RANGE_MSG.to_string());
            None
        }
        Err(_) => {
            errors.insert("rating".to_string(), NOT_DECIMAL_MSG.to_string());
            None
        }
    }
}

/// Checks a book about to be written and returns the copy the store should
/// keep: text trimmed, rating rounded to one place. Anything reaching the
/// catalog without going through a form still has to satisfy the same rules.
pub fn check_book<B: Book>(book: &B) -> LibraryResult<BookDto> {
    let mut errors = BTreeMap::new();
    let title = check_text("title", book.title(), &mut errors);
    let author = check_text("author", book.author(), &mut errors);
    if !is_valid_rating(book.rating()) {
        errors.insert("rating".to_string(), RATING_RANGE_MSG.to_string());
    }
    match (title, author, errors.into_iter().next()) {
        (_, _, Some((field, message))) => Err(LibraryError::validation(
            format!("{} {}", field, message).as_str(), Some(field))),
        (Some(title), Some(author), None) => {
            Ok(BookDto::new(title.as_str(), author.as_str(), round_rating(book.rating())).with_id(book.id()))
        }
        _ => Err(LibraryError::validation("book is incomplete", None)),
    }
}
