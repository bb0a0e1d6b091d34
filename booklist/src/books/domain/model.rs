use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;

// BookEntity is a row of the books table; id stays 0 until the store assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub rating: f64,
}

impl BookEntity {
    pub fn new(title: &str, author: &str, rating: f64) -> Self {
        Self {
            id: 0,
            title: title.to_string(),
            author: author.to_string(),
            rating,
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Book for BookEntity {
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
