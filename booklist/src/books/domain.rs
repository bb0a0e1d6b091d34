use crate::core::domain::Identifiable;

pub mod model;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;
pub const MAX_TEXT_LEN: usize = 250;

pub trait Book: Identifiable {
    fn title(&self) -> &str;
    fn author(&self) -> &str;
    fn rating(&self) -> f64;
}

// ratings keep one decimal place
pub fn round_rating(rating: f64) -> f64 {
    (rating * 10.0).round() / 10.0
}

pub fn is_valid_rating(rating: f64) -> bool {
    rating.is_finite() && (MIN_RATING..=MAX_RATING).contains(&rating)
}
