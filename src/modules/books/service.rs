//! Book Service - business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::modules::books::error::{BookError, BookResult};
use crate::modules::books::models::{Book, BookList, CreateBook, UpdateBook};
use crate::modules::books::repository::BookRepository;
use crate::modules::sellers::repository::SellerRepository;

pub struct BookService<B: BookRepository, S: SellerRepository> {
    books: Arc<B>,
    sellers: Arc<S>,
}

impl<B: BookRepository, S: SellerRepository> BookService<B, S> {
    pub fn new(books: B, sellers: S) -> Self {
        Self {
            books: Arc::new(books),
            sellers: Arc::new(sellers),
        }
    }

    async fn ensure_seller(&self, seller_id: i64) -> BookResult<()> {
        match self.sellers.get(seller_id).await? {
            Some(_) => Ok(()),
            None => Err(BookError::UnknownSeller(seller_id)),
        }
    }

    #[instrument(skip(self, input), fields(seller_id = input.seller_id))]
    pub async fn create_book(&self, input: CreateBook) -> BookResult<Book> {
        input.validate()?;
        self.ensure_seller(input.seller_id).await?;

        let book = self.books.create(input).await?;
        tracing::info!(book_id = book.id, "book created");
        Ok(book)
    }

    #[instrument(skip(self))]
    pub async fn list_books(&self) -> BookResult<BookList> {
        Ok(BookList {
            books: self.books.list().await?,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_book(&self, id: i64) -> BookResult<Book> {
        self.books.get(id).await?.ok_or(BookError::NotFound(id))
    }

    #[instrument(skip(self, input))]
    pub async fn update_book(&self, id: i64, input: UpdateBook) -> BookResult<Book> {
        input.validate()?;
        self.books.get(id).await?.ok_or(BookError::NotFound(id))?;
        self.ensure_seller(input.seller_id).await?;

        self.books
            .update(id, input)
            .await?
            .ok_or(BookError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_book(&self, id: i64) -> BookResult<()> {
        if !self.books.delete(id).await? {
            return Err(BookError::NotFound(id));
        }
        Ok(())
    }
}

impl<B: BookRepository, S: SellerRepository> Clone for BookService<B, S> {
    fn clone(&self) -> Self {
        Self {
            books: Arc::clone(&self.books),
            sellers: Arc::clone(&self.sellers),
        }
    }
}
