use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub rating: f64,
}

impl BookDto {
    pub fn new(title: &str, author: &str, rating: f64) -> BookDto {
        BookDto {
            id: 0,
            title: title.to_string(),
            author: author.to_string(),
            rating,
        }
    }

    pub fn with_id(mut self, id: i64) -> BookDto {
        self.id = id;
        self
    }

    // rating as shown on the listing and in forms
    pub fn display_rating(&self) -> String {
        format!("{:.1}", self.rating)
    }
}

impl Identifiable for BookDto {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Book for BookDto {
    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn author(&self) -> &str {
        self.author.as_str()
    }

    fn rating(&self) -> f64 {
        self.rating
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: other.id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            rating: other.rating,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            id: other.id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            rating: other.rating,
        }
    }
}
