use async_trait::async_trait;
use bookstore_db::DbResult;
use sqlx::{SqliteConnection, SqlitePool};

use crate::modules::books::models::{Book, CreateBook, UpdateBook};

const BOOK_COLUMNS: &str = "id, author, title, year, count_pages, seller_id";

/// Persistence boundary for book records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn create(&self, input: CreateBook) -> DbResult<Book>;

    async fn get(&self, id: i64) -> DbResult<Option<Book>>;

    /// All books in insertion order
    async fn list(&self) -> DbResult<Vec<Book>>;

    /// Books owned by one seller, in insertion order
    async fn list_by_seller(&self, seller_id: i64) -> DbResult<Vec<Book>>;

    async fn update(&self, id: i64, input: UpdateBook) -> DbResult<Option<Book>>;

    async fn delete(&self, id: i64) -> DbResult<bool>;

    /// Remove every book owned by a seller, returning how many were removed
    async fn delete_by_seller(&self, seller_id: i64) -> DbResult<u64>;
}

/// Delete a seller's books on an existing connection, so callers can run it
/// inside their own transaction.
pub async fn delete_books_of_seller(
    conn: &mut SqliteConnection,
    seller_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM books WHERE seller_id = ?")
        .bind(seller_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

#[derive(Debug, Clone)]
pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn create(&self, input: CreateBook) -> DbResult<Book> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "INSERT INTO books (author, title, year, count_pages, seller_id) \
             VALUES (?, ?, ?, ?, ?) RETURNING {BOOK_COLUMNS}"
        ))
        .bind(input.author)
        .bind(input.title)
        .bind(input.year)
        .bind(input.count_pages)
        .bind(input.seller_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(book)
    }

    async fn get(&self, id: i64) -> DbResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn list(&self) -> DbResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn list_by_seller(&self, seller_id: i64) -> DbResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE seller_id = ? ORDER BY id"
        ))
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    async fn update(&self, id: i64, input: UpdateBook) -> DbResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "UPDATE books SET author = ?, title = ?, year = ?, count_pages = ?, seller_id = ? \
             WHERE id = ? RETURNING {BOOK_COLUMNS}"
        ))
        .bind(input.author)
        .bind(input.title)
        .bind(input.year)
        .bind(input.count_pages)
        .bind(input.seller_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn delete(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_seller(&self, seller_id: i64) -> DbResult<u64> {
        let mut conn = self.pool.acquire().await?;
        let removed = delete_books_of_seller(&mut conn, seller_id).await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::testing::{insert_seller, migrated_db};

    fn book(title: &str, seller_id: i64) -> CreateBook {
        CreateBook {
            author: "bmll".to_string(),
            title: title.to_string(),
            year: 2000,
            count_pages: 100,
            seller_id,
        }
    }

    #[tokio::test]
    async fn list_by_seller_only_returns_owned_books() {
        let db = migrated_db().await;
        let repo = SqliteBookRepository::new(db.pool().clone());
        let alice = insert_seller(&db, "alice").await;
        let bob = insert_seller(&db, "bob").await;

        let first = repo.create(book("dfmv", alice)).await.unwrap();
        repo.create(book("other", bob)).await.unwrap();
        let second = repo.create(book("sequel", alice)).await.unwrap();

        let owned = repo.list_by_seller(alice).await.unwrap();
        assert_eq!(owned, vec![first, second]);
    }

    #[tokio::test]
    async fn book_requires_existing_seller() {
        let db = migrated_db().await;
        let repo = SqliteBookRepository::new(db.pool().clone());

        assert!(repo.create(book("orphan", 999)).await.is_err());
    }

    #[tokio::test]
    async fn delete_by_seller_reports_count() {
        let db = migrated_db().await;
        let repo = SqliteBookRepository::new(db.pool().clone());
        let seller = insert_seller(&db, "carol").await;
        repo.create(book("a", seller)).await.unwrap();
        repo.create(book("b", seller)).await.unwrap();

        assert_eq!(repo.delete_by_seller(seller).await.unwrap(), 2);
        assert!(repo.list_by_seller(seller).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_moves_book_between_sellers() {
        let db = migrated_db().await;
        let repo = SqliteBookRepository::new(db.pool().clone());
        let from = insert_seller(&db, "from").await;
        let to = insert_seller(&db, "to").await;
        let created = repo.create(book("moving", from)).await.unwrap();

        let updated = repo
            .update(created.id, book("moved", to))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.seller_id, to);
        assert_eq!(updated.title, "moved");
    }
}
