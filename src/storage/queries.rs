// Bookyard - Book Catalog Reporting Service
// Copyright (C) 2025 Bookyard contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Database query functions
//!
//! Repository-style insert and lookup functions for the catalog schema.
//!
//! # Query Patterns
//! - Free async functions taking `&SqlitePool`
//! - Async/await for all database operations
//! - Entities are only ever inserted (bulk for reviews); the deletion
//!   policies in the schema are exercised by nothing in this crate

use crate::error::{CatalogError, Result};
use crate::storage::models::*;
use sqlx::SqlitePool;

// ============================================================================
// USER QUERIES
// ============================================================================

/// Insert a new user
///
/// Returns the user_id of the inserted user.
pub async fn insert_user(pool: &SqlitePool, username: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO users (username) VALUES (?)")
        .bind(username)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

// ============================================================================
// AUTHOR QUERIES
// ============================================================================

/// Insert a new author
///
/// Returns the author_id of the inserted author.
/// Fails with a validation error if the name is empty.
pub async fn insert_author(pool: &SqlitePool, author: &NewAuthor) -> Result<i64> {
    if author.name.trim().is_empty() {
        return Err(CatalogError::Validation(
            "author name must not be empty".to_string(),
        ));
    }

    let result = sqlx::query("INSERT INTO authors (name, bio, creator_id) VALUES (?, ?, ?)")
        .bind(&author.name)
        .bind(&author.bio)
        .bind(author.creator_id)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Find author by ID
pub async fn find_author_by_id(pool: &SqlitePool, author_id: i64) -> Result<Option<Author>> {
    let author = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE author_id = ?")
        .bind(author_id)
        .fetch_optional(pool)
        .await?;

    Ok(author)
}

// ============================================================================
// PUBLISHER QUERIES
// ============================================================================

/// Insert a new publisher
pub async fn insert_publisher(pool: &SqlitePool, publisher: &NewPublisher) -> Result<i64> {
    let result =
        sqlx::query("INSERT INTO publishers (name, country, creator_id) VALUES (?, ?, ?)")
            .bind(&publisher.name)
            .bind(&publisher.country)
            .bind(publisher.creator_id)
            .execute(pool)
            .await?;

    Ok(result.last_insert_rowid())
}

/// Find publisher by ID
pub async fn find_publisher_by_id(
    pool: &SqlitePool,
    publisher_id: i64,
) -> Result<Option<Publisher>> {
    let publisher =
        sqlx::query_as::<_, Publisher>("SELECT * FROM publishers WHERE publisher_id = ?")
            .bind(publisher_id)
            .fetch_optional(pool)
            .await?;

    Ok(publisher)
}

// ============================================================================
// STORE QUERIES
// ============================================================================

/// Insert a new store
pub async fn insert_store(pool: &SqlitePool, store: &NewStore) -> Result<i64> {
    let result = sqlx::query("INSERT INTO stores (name, city) VALUES (?, ?)")
        .bind(&store.name)
        .bind(&store.city)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Find store by ID
pub async fn find_store_by_id(pool: &SqlitePool, store_id: i64) -> Result<Option<Store>> {
    let store = sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE store_id = ?")
        .bind(store_id)
        .fetch_optional(pool)
        .await?;

    Ok(store)
}

// ============================================================================
// BOOK QUERIES
// ============================================================================

/// Insert a new book
pub async fn insert_book(pool: &SqlitePool, book: &NewBook) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO books (title, published_date, description, author_id, publisher_id, creator_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&book.title)
    .bind(book.published_date)
    .bind(&book.description)
    .bind(book.author_id)
    .bind(book.publisher_id)
    .bind(book.creator_id)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Find book by ID
pub async fn find_book_by_id(pool: &SqlitePool, book_id: i64) -> Result<Option<Book>> {
    let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE book_id = ?")
        .bind(book_id)
        .fetch_optional(pool)
        .await?;

    Ok(book)
}

/// Record that a store stocks a book
///
/// Stocking the same book twice in one store is a no-op.
pub async fn stock_book(pool: &SqlitePool, book_id: i64, store_id: i64) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO book_stores (book_id, store_id) VALUES (?, ?)")
        .bind(book_id)
        .bind(store_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// List the stores stocking a book, name order
pub async fn list_stores_for_book(pool: &SqlitePool, book_id: i64) -> Result<Vec<Store>> {
    let stores = sqlx::query_as::<_, Store>(
        r#"
        SELECT s.* FROM stores s
        INNER JOIN book_stores bs ON s.store_id = bs.store_id
        WHERE bs.book_id = ?
        ORDER BY s.name, s.city
        "#,
    )
    .bind(book_id)
    .fetch_all(pool)
    .await?;

    Ok(stores)
}

// ============================================================================
// REVIEW QUERIES
// ============================================================================

/// Insert a single review
///
/// The rating is expected pre-clamped by [`NewReview::new`]; the comment is
/// validated against the 1000-character bound.
pub async fn insert_review(pool: &SqlitePool, review: &NewReview) -> Result<i64> {
    validate_comment(&review.comment)?;

    let result = sqlx::query(
        "INSERT INTO reviews (book_id, rating, comment, creator_id) VALUES (?, ?, ?, ?)",
    )
    .bind(review.book_id)
    .bind(review.rating)
    .bind(&review.comment)
    .bind(review.creator_id)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Bulk-insert reviews inside a single transaction
///
/// Either every review lands or none do.
pub async fn insert_reviews(pool: &SqlitePool, reviews: &[NewReview]) -> Result<()> {
    for review in reviews {
        validate_comment(&review.comment)?;
    }

    let mut tx = pool.begin().await?;

    for review in reviews {
        sqlx::query("INSERT INTO reviews (book_id, rating, comment, creator_id) VALUES (?, ?, ?, ?)")
            .bind(review.book_id)
            .bind(review.rating)
            .bind(&review.comment)
            .bind(review.creator_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(())
}

/// List reviews for a book, rating order
pub async fn list_reviews_for_book(pool: &SqlitePool, book_id: i64) -> Result<Vec<Review>> {
    let reviews =
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE book_id = ? ORDER BY rating")
            .bind(book_id)
            .fetch_all(pool)
            .await?;

    Ok(reviews)
}

fn validate_comment(comment: &str) -> Result<()> {
    if comment.chars().count() > COMMENT_MAX_CHARS {
        return Err(CatalogError::Validation(format!(
            "review comment exceeds {} characters",
            COMMENT_MAX_CHARS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database::Database;
    use chrono::NaiveDate;

    async fn seed_book(db: &Database) -> (i64, i64) {
        let user_id = insert_user(db.pool(), "librarian").await.expect("user");
        let author = NewAuthor::new("Test Author".to_string(), user_id);
        let author_id = insert_author(db.pool(), &author).await.expect("author");
        let publisher = NewPublisher::new("Test House".to_string(), "Norway".to_string(), user_id);
        let publisher_id = insert_publisher(db.pool(), &publisher)
            .await
            .expect("publisher");

        let book = NewBook::new(
            "Test Book".to_string(),
            NaiveDate::from_ymd_opt(2021, 6, 1).expect("date"),
            author_id,
            publisher_id,
            user_id,
        );
        let book_id = insert_book(db.pool(), &book).await.expect("book");

        (book_id, user_id)
    }

    #[tokio::test]
    async fn test_insert_and_find_book() {
        let db = Database::new_in_memory().await.expect("db");
        let (book_id, _) = seed_book(&db).await;

        let found = find_book_by_id(db.pool(), book_id)
            .await
            .expect("query")
            .expect("book missing");

        assert_eq!(found.title, "Test Book");
        assert_eq!(
            found.published_date,
            NaiveDate::from_ymd_opt(2021, 6, 1).expect("date")
        );
        assert!(found.deleted_at.is_none());
    }

    #[tokio::test]
    async fn test_empty_author_name_rejected() {
        let db = Database::new_in_memory().await.expect("db");
        let user_id = insert_user(db.pool(), "librarian").await.expect("user");

        let author = NewAuthor::new("   ".to_string(), user_id);
        let err = insert_author(db.pool(), &author)
            .await
            .expect_err("empty name should fail");

        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_oversized_comment_rejected() {
        let db = Database::new_in_memory().await.expect("db");
        let (book_id, user_id) = seed_book(&db).await;

        let review = NewReview::new(book_id, 5, "x".repeat(1001), user_id);
        let err = insert_review(db.pool(), &review)
            .await
            .expect_err("oversized comment should fail");

        assert!(matches!(err, CatalogError::Validation(_)));

        // Exactly at the bound is fine
        let review = NewReview::new(book_id, 5, "x".repeat(1000), user_id);
        insert_review(db.pool(), &review)
            .await
            .expect("comment at bound should insert");
    }

    #[tokio::test]
    async fn test_bulk_insert_reviews() {
        let db = Database::new_in_memory().await.expect("db");
        let (book_id, user_id) = seed_book(&db).await;

        let reviews: Vec<NewReview> = [8, 9, 7]
            .into_iter()
            .map(|r| NewReview::new(book_id, r, format!("rated {r}"), user_id))
            .collect();
        insert_reviews(db.pool(), &reviews).await.expect("bulk");

        let stored = list_reviews_for_book(db.pool(), book_id)
            .await
            .expect("list");
        assert_eq!(stored.len(), 3);
        assert_eq!(
            stored.iter().map(|r| r.rating).collect::<Vec<_>>(),
            vec![7, 8, 9]
        );
    }

    #[tokio::test]
    async fn test_stock_book_is_idempotent() {
        let db = Database::new_in_memory().await.expect("db");
        let (book_id, _) = seed_book(&db).await;

        let store_id = insert_store(
            db.pool(),
            &NewStore::new("Main St Books".to_string(), "Oslo".to_string()),
        )
        .await
        .expect("store");

        stock_book(db.pool(), book_id, store_id).await.expect("stock");
        stock_book(db.pool(), book_id, store_id).await.expect("restock");

        let stores = list_stores_for_book(db.pool(), book_id).await.expect("list");
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].city, "Oslo");
    }

    #[tokio::test]
    async fn test_author_delete_cascades_to_books_and_reviews() {
        let db = Database::new_in_memory().await.expect("db");
        let (book_id, user_id) = seed_book(&db).await;

        let review = NewReview::new(book_id, 6, String::new(), user_id);
        insert_review(db.pool(), &review).await.expect("review");

        let book = find_book_by_id(db.pool(), book_id)
            .await
            .expect("query")
            .expect("book");
        sqlx::query("DELETE FROM authors WHERE author_id = ?")
            .bind(book.author_id)
            .execute(db.pool())
            .await
            .expect("delete author");

        assert!(find_author_by_id(db.pool(), book.author_id)
            .await
            .expect("query")
            .is_none());
        assert!(find_book_by_id(db.pool(), book_id)
            .await
            .expect("query")
            .is_none());
        let reviews = list_reviews_for_book(db.pool(), book_id).await.expect("list");
        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn test_publisher_delete_blocked_by_books() {
        let db = Database::new_in_memory().await.expect("db");
        let (book_id, _) = seed_book(&db).await;

        let book = find_book_by_id(db.pool(), book_id)
            .await
            .expect("query")
            .expect("book");

        let result = sqlx::query("DELETE FROM publishers WHERE publisher_id = ?")
            .bind(book.publisher_id)
            .execute(db.pool())
            .await;

        assert!(result.is_err(), "publisher delete should be restricted");

        // Still present
        let publisher = find_publisher_by_id(db.pool(), book.publisher_id)
            .await
            .expect("query")
            .expect("publisher");
        assert_eq!(publisher.name, "Test House");
    }
}
