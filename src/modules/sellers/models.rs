use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::books::models::Book;

/// Stored seller row. Not `Serialize`; responses use the view types below.
#[derive(Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Seller {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Seller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seller")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Request body for `POST /api/v1/sellers/`.
#[derive(Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateSeller {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl fmt::Debug for CreateSeller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateSeller")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Request body for `PUT /api/v1/sellers/{id}`; replaces all editable fields.
///
/// `id` may be echoed back by clients but must match the path when present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateSeller {
    pub id: Option<i64>,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub email: String,
}

/// Public projection of a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerView {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub id: i64,
}

impl From<Seller> for SellerView {
    fn from(seller: Seller) -> Self {
        Self {
            first_name: seller.first_name,
            last_name: seller.last_name,
            email: seller.email,
            id: seller.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerList {
    pub sellers: Vec<SellerView>,
}

/// Single-seller view with the books the seller owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerDetail {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub books: Vec<Book>,
}

impl SellerDetail {
    pub fn new(seller: Seller, books: Vec<Book>) -> Self {
        Self {
            first_name: seller.first_name,
            last_name: seller.last_name,
            email: seller.email,
            books,
        }
    }
}
