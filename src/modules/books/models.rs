use serde::{Deserialize, Serialize};
use validator::Validate;

/// Catalog entry owned by exactly one seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub author: String,
    pub title: String,
    pub year: i32,
    pub count_pages: i32,
    pub id: i64,
    /// Owning seller
    pub seller_id: i64,
}

/// Request model for creating a book, or replacing all of its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1))]
    pub author: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub year: i32,
    pub count_pages: i32,
    pub seller_id: i64,
}

pub type UpdateBook = CreateBook;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookList {
    pub books: Vec<Book>,
}
