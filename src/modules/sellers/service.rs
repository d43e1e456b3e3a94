//! Seller Service - orchestrates validation and store calls

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::modules::books::repository::BookRepository;
use crate::modules::sellers::error::{SellerError, SellerResult};
use crate::modules::sellers::models::{
    CreateSeller, SellerDetail, SellerList, SellerView, UpdateSeller,
};
use crate::modules::sellers::repository::SellerRepository;

/// Seller operations; every result is a password-free view.
pub struct SellerService<S: SellerRepository, B: BookRepository> {
    sellers: Arc<S>,
    books: Arc<B>,
}

impl<S: SellerRepository, B: BookRepository> SellerService<S, B> {
    pub fn new(sellers: S, books: B) -> Self {
        Self {
            sellers: Arc::new(sellers),
            books: Arc::new(books),
        }
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_seller(&self, input: CreateSeller) -> SellerResult<SellerView> {
        input.validate()?;

        let seller = self.sellers.create(input).await?;
        tracing::info!(seller_id = seller.id, "seller created");
        Ok(seller.into())
    }

    #[instrument(skip(self))]
    pub async fn list_sellers(&self) -> SellerResult<SellerList> {
        let sellers = self.sellers.list().await?;
        Ok(SellerList {
            sellers: sellers.into_iter().map(SellerView::from).collect(),
        })
    }

    #[instrument(skip(self))]
    pub async fn get_seller(&self, id: i64) -> SellerResult<SellerDetail> {
        let seller = self
            .sellers
            .get(id)
            .await?
            .ok_or(SellerError::NotFound(id))?;
        let books = self.books.list_by_seller(id).await?;

        Ok(SellerDetail::new(seller, books))
    }

    #[instrument(skip(self, input))]
    pub async fn update_seller(&self, id: i64, input: UpdateSeller) -> SellerResult<SellerView> {
        input.validate()?;

        if let Some(body_id) = input.id {
            if body_id != id {
                return Err(SellerError::Validation {
                    message: format!("body id {body_id} does not match path id {id}"),
                    details: vec![serde_json::json!({
                        "field": "id",
                        "code": "mismatch",
                        "message": "must equal the id in the path",
                    })],
                });
            }
        }

        self.sellers
            .get(id)
            .await?
            .ok_or(SellerError::NotFound(id))?;

        let seller = self
            .sellers
            .update(id, input)
            .await?
            .ok_or(SellerError::NotFound(id))?;
        Ok(seller.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_seller(&self, id: i64) -> SellerResult<()> {
        self.sellers
            .get(id)
            .await?
            .ok_or(SellerError::NotFound(id))?;

        if !self.sellers.delete(id).await? {
            return Err(SellerError::NotFound(id));
        }
        tracing::info!(seller_id = id, "seller deleted");
        Ok(())
    }
}

impl<S: SellerRepository, B: BookRepository> Clone for SellerService<S, B> {
    fn clone(&self) -> Self {
        Self {
            sellers: Arc::clone(&self.sellers),
            books: Arc::clone(&self.books),
        }
    }
}
