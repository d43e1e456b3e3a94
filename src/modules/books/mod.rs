pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;

use async_trait::async_trait;
use axum::Router;
use bookstore_db::Database;
use bookstore_kernel::{InitCtx, Migration, Module};
use serde_json::json;

use crate::modules::sellers::repository::SqliteSellerRepository;
use repository::SqliteBookRepository;
use service::BookService;

pub const MODULE_NAME: &str = "books";

/// Books module: owns the `books` table and the book resource
pub struct BooksModule {
    service: BookService<SqliteBookRepository, SqliteSellerRepository>,
}

impl BooksModule {
    pub fn new(db: &Database) -> Self {
        Self {
            service: BookService::new(
                SqliteBookRepository::new(db.pool().clone()),
                SqliteSellerRepository::new(db.pool().clone()),
            ),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let book_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/CreateBook" }
                }
            }
        });
        let book_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Book" }
                    }
                }
            })
        };
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        }]);

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "All books in creation order",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "books": {
                                                    "type": "array",
                                                    "items": { "$ref": "#/components/schemas/Book" }
                                                }
                                            },
                                            "required": ["books"]
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create book",
                        "tags": ["Books"],
                        "requestBody": book_body,
                        "responses": {
                            "201": book_response("Book created"),
                            "422": error("Validation error or unknown seller")
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get book",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "responses": {
                            "200": book_response("Book"),
                            "404": error("Book not found")
                        }
                    },
                    "put": {
                        "summary": "Replace book fields",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "requestBody": book_body,
                        "responses": {
                            "200": book_response("Updated book"),
                            "404": error("Book not found"),
                            "422": error("Validation error or unknown seller")
                        }
                    },
                    "delete": {
                        "summary": "Delete book",
                        "tags": ["Books"],
                        "parameters": id_param,
                        "responses": {
                            "204": { "description": "Book deleted" },
                            "404": error("Book not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "author": { "type": "string" },
                            "title": { "type": "string" },
                            "year": { "type": "integer" },
                            "count_pages": { "type": "integer" },
                            "seller_id": { "type": "integer", "format": "int64" }
                        },
                        "required": ["id", "author", "title", "year", "count_pages", "seller_id"]
                    },
                    "CreateBook": {
                        "type": "object",
                        "properties": {
                            "author": { "type": "string", "minLength": 1 },
                            "title": { "type": "string", "minLength": 1 },
                            "year": { "type": "integer" },
                            "count_pages": { "type": "integer" },
                            "seller_id": { "type": "integer", "format": "int64" }
                        },
                        "required": ["author", "title", "year", "count_pages", "seller_id"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS books (
                    id          INTEGER PRIMARY KEY AUTOINCREMENT,
                    author      TEXT NOT NULL CHECK (author <> ''),
                    title       TEXT NOT NULL CHECK (title <> ''),
                    year        INTEGER NOT NULL,
                    count_pages INTEGER NOT NULL,
                    seller_id   INTEGER NOT NULL REFERENCES sellers (id) ON DELETE CASCADE
                );
                CREATE INDEX IF NOT EXISTS books_seller_id_idx ON books (seller_id);
                "#,
        }]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(db: &Database) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(db))
}
