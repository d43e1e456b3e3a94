//! Shared harness: full router over a fresh in-memory database.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bookstore_app::modules::{
    books::{
        models::{Book, CreateBook},
        repository::{BookRepository, SqliteBookRepository},
    },
    sellers::{
        models::{CreateSeller, Seller},
        repository::{SellerRepository, SqliteSellerRepository},
    },
};
use bookstore_db::Database;
use bookstore_kernel::settings::Settings;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub db: Database,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Database::in_memory().await.unwrap();
        let registry = bookstore_app::build_registry(&db);
        bookstore_app::app::migrate(&db, &registry).await.unwrap();
        let router = bookstore_http::build_router(&registry, &Settings::default());
        Self { db, router }
    }

    pub fn sellers(&self) -> SqliteSellerRepository {
        SqliteSellerRepository::new(self.db.pool().clone())
    }

    pub fn books(&self) -> SqliteBookRepository {
        SqliteBookRepository::new(self.db.pool().clone())
    }

    /// Insert a seller straight through the store, bypassing the POST route.
    pub async fn seed_seller(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Seller {
        self.sellers()
            .create(CreateSeller {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn seed_book(&self, title: &str, seller_id: i64) -> Book {
        self.books()
            .create(CreateBook {
                author: "bmll".to_string(),
                title: title.to_string(),
                year: 2000,
                count_pages: 100,
                seller_id,
            })
            .await
            .unwrap()
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
