use std::fmt::Write;
use axum::http::StatusCode;
use crate::books::dto::BookDto;
use crate::catalog::form::{AddBookForm, EditBookForm, ValidationResult};
use crate::utils::html::escape;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@3.4.1/dist/css/bootstrap.min.css";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
         <link rel=\"stylesheet\" href=\"{}\">\n</head>\n<body>\n<div class=\"container\">\n{}\n</div>\n</body>\n</html>\n",
        escape(title), BOOTSTRAP_CSS, body)
}

pub fn render_index(books: &[BookDto]) -> String {
    let mut body = String::from("<h1>My Library</h1>\n");
    if books.is_empty() {
        body.push_str("<p>Library is empty.</p>\n");
    } else {
        body.push_str("<ul class=\"books\">\n");
        for book in books {
            let _ = writeln!(
                body,
                "<li><a href=\"/delete/{id}\">Delete</a> {title} - {author} - {rating}/10 <a href=\"/edit/{id}\">Edit Rating</a></li>",
                id = book.id,
                title = escape(book.title.as_str()),
                author = escape(book.author.as_str()),
                rating = book.display_rating());
        }
        body.push_str("</ul>\n");
    }
    body.push_str("<a href=\"/add\">Add New Book</a>\n");
    page("Library", body.as_str())
}

pub fn render_add(form: &AddBookForm, result: Option<&ValidationResult>) -> String {
    let mut body = String::from("<h1>Add Book</h1>\n<form action=\"/add\" method=\"POST\" novalidate>\n");
    text_field(&mut body, "title", "Book Title", form.title.as_str(), result);
    text_field(&mut body, "author", "Author Name", form.author.as_str(), result);
    text_field(&mut body, "rating", "Rating", form.rating.as_str(), result);
    body.push_str("<input class=\"btn btn-default\" type=\"submit\" value=\"Add Book\">\n</form>\n");
    body.push_str("<a href=\"/\">Back to Library</a>\n");
    page("Add Book", body.as_str())
}

pub fn render_edit(book_id: i64, form: &EditBookForm, result: Option<&ValidationResult>) -> String {
    let mut body = String::from("<h1>Edit Book</h1>\n");
    let _ = writeln!(body, "<form action=\"/edit/{}\" method=\"POST\" novalidate>", book_id);
    let _ = writeln!(body, "<input type=\"hidden\" name=\"id\" value=\"{}\">", escape(form.id.as_str()));
    text_field(&mut body, "title", "Book Title", form.title.as_str(), result);
    text_field(&mut body, "author", "Author Name", form.author.as_str(), result);
    text_field(&mut body, "rating", "Rating", form.rating.as_str(), result);
    body.push_str("<input class=\"btn btn-default\" type=\"submit\" value=\"Update Book\">\n</form>\n");
    body.push_str("<a href=\"/\">Back to Library</a>\n");
    page("Edit Book", body.as_str())
}

pub fn render_error(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{} {}</h1>\n<p>{}</p>\n<a href=\"/\">Back to Library</a>\n",
        status.as_u16(), escape(status.canonical_reason().unwrap_or("Error")), escape(message));
    page("Library", body.as_str())
}

fn text_field(body: &mut String, name: &str, label: &str, value: &str, result: Option<&ValidationResult>) {
    let error = result.and_then(|r| r.error(name));
    let class = if error.is_some() { "form-group has-error" } else { "form-group" };
    let _ = writeln!(body, "<div class=\"{}\">", class);
    let _ = writeln!(body, "<label class=\"control-label\" for=\"{name}\">{label}</label>", name = name, label = label);
    let _ = writeln!(body, "<input class=\"form-control\" id=\"{name}\" name=\"{name}\" type=\"text\" value=\"{value}\">",
                     name = name, value = escape(value));
    if let Some(message) = error {
        let _ = writeln!(body, "<p class=\"help-block\">{}</p>", escape(message));
    }
    body.push_str("</div>\n");
}
