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

use crate::modules::books::repository::SqliteBookRepository;
use repository::SqliteSellerRepository;
use service::SellerService;

pub const MODULE_NAME: &str = "sellers";

/// Sellers module: owns the `sellers` table and the seller resource
pub struct SellersModule {
    service: SellerService<SqliteSellerRepository, SqliteBookRepository>,
}

impl SellersModule {
    pub fn new(db: &Database) -> Self {
        Self {
            service: SellerService::new(
                SqliteSellerRepository::new(db.pool().clone()),
                SqliteBookRepository::new(db.pool().clone()),
            ),
        }
    }
}

#[async_trait]
impl Module for SellersModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        ctx.db.ping().await?;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "sellers module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let not_found = json!({
            "description": "Seller not found",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let unprocessable = json!({
            "description": "Validation error",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        }]);

        let schemas = json!({
            "Seller": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer", "format": "int64" },
                    "first_name": { "type": "string" },
                    "last_name": { "type": "string" },
                    "email": { "type": "string" }
                },
                "required": ["id", "first_name", "last_name", "email"]
            },
            "SellerList": {
                "type": "object",
                "properties": {
                    "sellers": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/Seller" }
                    }
                },
                "required": ["sellers"]
            },
            "SellerDetail": {
                "type": "object",
                "properties": {
                    "first_name": { "type": "string" },
                    "last_name": { "type": "string" },
                    "email": { "type": "string" },
                    "books": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/Book" }
                    }
                },
                "required": ["first_name", "last_name", "email", "books"]
            },
            "CreateSeller": {
                "type": "object",
                "properties": {
                    "first_name": { "type": "string", "minLength": 1 },
                    "last_name": { "type": "string", "minLength": 1 },
                    "email": { "type": "string", "minLength": 1 },
                    "password": { "type": "string", "minLength": 1, "writeOnly": true }
                },
                "required": ["first_name", "last_name", "email", "password"]
            },
            "UpdateSeller": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer", "format": "int64" },
                    "first_name": { "type": "string", "minLength": 1 },
                    "last_name": { "type": "string", "minLength": 1 },
                    "email": { "type": "string", "minLength": 1 }
                },
                "required": ["first_name", "last_name", "email"]
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List sellers",
                        "tags": ["Sellers"],
                        "responses": {
                            "200": {
                                "description": "All sellers in creation order",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/SellerList" }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create seller",
                        "tags": ["Sellers"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateSeller" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Seller created",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Seller" }
                                    }
                                }
                            },
                            "422": unprocessable
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get seller with books",
                        "tags": ["Sellers"],
                        "parameters": id_param,
                        "responses": {
                            "200": {
                                "description": "Seller and owned books",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/SellerDetail" }
                                    }
                                }
                            },
                            "404": not_found
                        }
                    },
                    "put": {
                        "summary": "Replace seller fields",
                        "tags": ["Sellers"],
                        "parameters": id_param,
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/UpdateSeller" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Updated seller",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Seller" }
                                    }
                                }
                            },
                            "404": not_found,
                            "422": unprocessable
                        }
                    },
                    "delete": {
                        "summary": "Delete seller and owned books",
                        "tags": ["Sellers"],
                        "parameters": id_param,
                        "responses": {
                            "204": { "description": "Seller deleted" },
                            "404": not_found
                        }
                    }
                }
            },
            "components": { "schemas": schemas }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS sellers (
                    id         INTEGER PRIMARY KEY AUTOINCREMENT,
                    first_name TEXT NOT NULL CHECK (first_name <> ''),
                    last_name  TEXT NOT NULL CHECK (last_name <> ''),
                    email      TEXT NOT NULL,
                    password   TEXT NOT NULL
                );
                "#,
        }]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "sellers module stopped");
        Ok(())
    }
}

/// Create a new instance of the sellers module
pub fn create_module(db: &Database) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(SellersModule::new(db))
}
