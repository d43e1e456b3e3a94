use async_trait::async_trait;
use bookstore_db::DbResult;
use sqlx::SqlitePool;

use crate::modules::books::repository::delete_books_of_seller;
use crate::modules::sellers::models::{CreateSeller, Seller, UpdateSeller};

const SELLER_COLUMNS: &str = "id, first_name, last_name, email, password";

/// Persistence boundary for seller records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SellerRepository: Send + Sync {
    /// Insert a seller and return the stored row with its new id
    async fn create(&self, input: CreateSeller) -> DbResult<Seller>;

    async fn get(&self, id: i64) -> DbResult<Option<Seller>>;

    /// All sellers in insertion order
    async fn list(&self) -> DbResult<Vec<Seller>>;

    /// Replace first name, last name and email; the password is never touched
    async fn update(&self, id: i64, input: UpdateSeller) -> DbResult<Option<Seller>>;

    /// Remove the seller and every book it owns; `false` when the id is unknown
    async fn delete(&self, id: i64) -> DbResult<bool>;
}

#[derive(Debug, Clone)]
pub struct SqliteSellerRepository {
    pool: SqlitePool,
}

impl SqliteSellerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SellerRepository for SqliteSellerRepository {
    async fn create(&self, input: CreateSeller) -> DbResult<Seller> {
        let seller = sqlx::query_as::<_, Seller>(&format!(
            "INSERT INTO sellers (first_name, last_name, email, password) \
             VALUES (?, ?, ?, ?) RETURNING {SELLER_COLUMNS}"
        ))
        .bind(input.first_name)
        .bind(input.last_name)
        .bind(input.email)
        .bind(input.password)
        .fetch_one(&self.pool)
        .await?;

        Ok(seller)
    }

    async fn get(&self, id: i64) -> DbResult<Option<Seller>> {
        let seller = sqlx::query_as::<_, Seller>(&format!(
            "SELECT {SELLER_COLUMNS} FROM sellers WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(seller)
    }

    async fn list(&self) -> DbResult<Vec<Seller>> {
        let sellers = sqlx::query_as::<_, Seller>(&format!(
            "SELECT {SELLER_COLUMNS} FROM sellers ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sellers)
    }

    async fn update(&self, id: i64, input: UpdateSeller) -> DbResult<Option<Seller>> {
        let seller = sqlx::query_as::<_, Seller>(&format!(
            "UPDATE sellers SET first_name = ?, last_name = ?, email = ? \
             WHERE id = ? RETURNING {SELLER_COLUMNS}"
        ))
        .bind(input.first_name)
        .bind(input.last_name)
        .bind(input.email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(seller)
    }

    async fn delete(&self, id: i64) -> DbResult<bool> {
        let mut tx = self.pool.begin().await?;

        let books_removed = delete_books_of_seller(&mut tx, id).await?;
        let result = sqlx::query("DELETE FROM sellers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        tracing::debug!(seller_id = id, books_removed, "seller deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::CreateBook;
    use crate::modules::books::repository::{BookRepository, SqliteBookRepository};
    use crate::modules::testing::migrated_db;

    fn new_seller(first_name: &str) -> CreateSeller {
        CreateSeller {
            first_name: first_name.to_string(),
            last_name: "vlsl".to_string(),
            email: format!("{first_name}@gmail.com"),
            password: "0000".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_ids_in_insertion_order() {
        let db = migrated_db().await;
        let repo = SqliteSellerRepository::new(db.pool().clone());

        let first = repo.create(new_seller("lblb")).await.unwrap();
        let second = repo.create(new_seller("vfkee")).await.unwrap();

        assert!(second.id > first.id);
        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.first_name)
            .collect();
        assert_eq!(names, vec!["lblb", "vfkee"]);
    }

    #[tokio::test]
    async fn update_keeps_password_and_id() {
        let db = migrated_db().await;
        let repo = SqliteSellerRepository::new(db.pool().clone());
        let seller = repo.create(new_seller("lmblf")).await.unwrap();

        let updated = repo
            .update(
                seller.id,
                UpdateSeller {
                    id: None,
                    first_name: "lef".to_string(),
                    last_name: "slpvps".to_string(),
                    email: "slpvps@gmail.com".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, seller.id);
        assert_eq!(updated.first_name, "lef");
        assert_eq!(updated.password, "0000");
    }

    #[tokio::test]
    async fn update_unknown_seller_returns_none() {
        let db = migrated_db().await;
        let repo = SqliteSellerRepository::new(db.pool().clone());

        let result = repo
            .update(
                404,
                UpdateSeller {
                    id: None,
                    first_name: "a".to_string(),
                    last_name: "b".to_string(),
                    email: "c".to_string(),
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_cascades_to_books() {
        let db = migrated_db().await;
        let sellers = SqliteSellerRepository::new(db.pool().clone());
        let books = SqliteBookRepository::new(db.pool().clone());

        let doomed = sellers.create(new_seller("doomed")).await.unwrap();
        let keeper = sellers.create(new_seller("keeper")).await.unwrap();
        for (seller_id, title) in [(doomed.id, "one"), (doomed.id, "two"), (keeper.id, "three")] {
            books
                .create(CreateBook {
                    author: "bmll".to_string(),
                    title: title.to_string(),
                    year: 2000,
                    count_pages: 100,
                    seller_id,
                })
                .await
                .unwrap();
        }

        assert!(sellers.delete(doomed.id).await.unwrap());

        assert!(sellers.get(doomed.id).await.unwrap().is_none());
        assert!(books.list_by_seller(doomed.id).await.unwrap().is_empty());
        assert_eq!(books.list_by_seller(keeper.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_unknown_seller_returns_false() {
        let db = migrated_db().await;
        let repo = SqliteSellerRepository::new(db.pool().clone());
        assert!(!repo.delete(12).await.unwrap());
    }
}
