pub mod html;
pub mod sqlite;
