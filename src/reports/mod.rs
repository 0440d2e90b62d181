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


//! Aggregate report queries
//!
//! The reporting core of the crate: parametrized read queries that join and
//! aggregate across books, publishers, stores, and reviews.
//!
//! Derived fields:
//! - mean review rating: `ROUND(AVG(rating), 2)` over a book's reviews,
//!   NULL for a book with no reviews. SQLite sorts NULL below every value,
//!   so a DESC rating order places reviewless books last.
//! - store availability: `COUNT(DISTINCT store_id)` over the stocking
//!   junction, optionally restricted to one city.

use crate::error::{CatalogError, Result};
use crate::storage::models::Store;
use crate::storage::queries;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::collections::HashMap;

// ============================================================================
// ROW TYPES
// ============================================================================

/// Book row for the annotated book-list reports
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BookReportRow {
    pub book_id: i64,
    pub title: String,
    pub published_date: chrono::NaiveDate,
    pub author_name: String,
    pub publisher_name: String,
    pub publisher_country: String,
    /// Mean review rating rounded to 2 decimals; None for reviewless books
    pub average_rating: Option<f64>,
    /// Distinct stores stocking the book (city-restricted for the by-city report)
    pub available_in_stores: i64,
}

/// Book row for plain book lists (start page, store report book lists)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BookSummary {
    pub book_id: i64,
    pub title: String,
    pub published_date: chrono::NaiveDate,
    pub author_name: String,
    pub publisher_name: String,
}

/// Book row for the store detail view, annotated with its mean rating
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RatedBook {
    pub book_id: i64,
    pub title: String,
    pub published_date: chrono::NaiveDate,
    pub author_name: String,
    pub publisher_name: String,
    pub average_rating: Option<f64>,
}

/// One store in the inventory report, preloaded with its book list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreReportRow {
    pub store_id: i64,
    pub name: String,
    pub city: String,
    /// Distinct books stocked (restricted by year for the by-year report)
    pub book_count: i64,
    pub books: Vec<BookSummary>,
}

/// Single-store detail: the store, its rated book list, and a total count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDetail {
    pub store: Store,
    pub book_count: i64,
    pub books: Vec<RatedBook>,
}

#[derive(Debug, FromRow)]
struct StoreCountRow {
    store_id: i64,
    name: String,
    city: String,
    book_count: i64,
}

#[derive(Debug, FromRow)]
struct StoreBookRow {
    store_id: i64,
    book_id: i64,
    title: String,
    published_date: chrono::NaiveDate,
    author_name: String,
    publisher_name: String,
}

// ============================================================================
// BOOK REPORTS
// ============================================================================

/// List every book with author and publisher names, title order
pub async fn list_books(pool: &SqlitePool) -> Result<Vec<BookSummary>> {
    let books = sqlx::query_as::<_, BookSummary>(
        r#"
        SELECT
            b.book_id,
            b.title,
            b.published_date,
            a.name AS author_name,
            p.name AS publisher_name
        FROM books b
        INNER JOIN authors a ON a.author_id = b.author_id
        INNER JOIN publishers p ON p.publisher_id = b.publisher_id
        ORDER BY b.title
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(books)
}

/// Books whose publisher is in the given country, annotated with mean
/// rating and the count of distinct stores stocking them
pub async fn books_by_country(pool: &SqlitePool, country: &str) -> Result<Vec<BookReportRow>> {
    let books = sqlx::query_as::<_, BookReportRow>(
        r#"
        WITH review_stats AS (
            SELECT book_id, ROUND(AVG(rating), 2) AS average_rating
            FROM reviews
            GROUP BY book_id
        ),
        stock_counts AS (
            SELECT book_id, COUNT(DISTINCT store_id) AS store_count
            FROM book_stores
            GROUP BY book_id
        )
        SELECT
            b.book_id,
            b.title,
            b.published_date,
            a.name AS author_name,
            p.name AS publisher_name,
            p.country AS publisher_country,
            rs.average_rating,
            COALESCE(sc.store_count, 0) AS available_in_stores
        FROM books b
        INNER JOIN authors a ON a.author_id = b.author_id
        INNER JOIN publishers p ON p.publisher_id = b.publisher_id
        LEFT JOIN review_stats rs ON rs.book_id = b.book_id
        LEFT JOIN stock_counts sc ON sc.book_id = b.book_id
        WHERE p.country = ?
        ORDER BY b.title
        "#,
    )
    .bind(country)
    .fetch_all(pool)
    .await?;

    Ok(books)
}

/// Books stocked by at least one store in the given city
///
/// The store count covers only stores in that city, not the book's full
/// store set.
pub async fn books_by_city(pool: &SqlitePool, city: &str) -> Result<Vec<BookReportRow>> {
    let books = sqlx::query_as::<_, BookReportRow>(
        r#"
        WITH review_stats AS (
            SELECT book_id, ROUND(AVG(rating), 2) AS average_rating
            FROM reviews
            GROUP BY book_id
        ),
        city_stock AS (
            SELECT bs.book_id, COUNT(DISTINCT bs.store_id) AS store_count
            FROM book_stores bs
            INNER JOIN stores s ON s.store_id = bs.store_id
            WHERE s.city = ?
            GROUP BY bs.book_id
        )
        SELECT
            b.book_id,
            b.title,
            b.published_date,
            a.name AS author_name,
            p.name AS publisher_name,
            p.country AS publisher_country,
            rs.average_rating,
            cs.store_count AS available_in_stores
        FROM books b
        INNER JOIN authors a ON a.author_id = b.author_id
        INNER JOIN publishers p ON p.publisher_id = b.publisher_id
        INNER JOIN city_stock cs ON cs.book_id = b.book_id
        LEFT JOIN review_stats rs ON rs.book_id = b.book_id
        ORDER BY b.title
        "#,
    )
    .bind(city)
    .fetch_all(pool)
    .await?;

    Ok(books)
}

/// Books whose mean rating strictly exceeds the threshold, ordered mean
/// DESC then title ASC
///
/// The comparison applies to the rounded mean. Reviewless books carry a NULL
/// mean and are excluded for any threshold.
pub async fn books_by_rating(pool: &SqlitePool, threshold: f64) -> Result<Vec<BookReportRow>> {
    let books = sqlx::query_as::<_, BookReportRow>(
        r#"
        WITH review_stats AS (
            SELECT book_id, ROUND(AVG(rating), 2) AS average_rating
            FROM reviews
            GROUP BY book_id
        ),
        stock_counts AS (
            SELECT book_id, COUNT(DISTINCT store_id) AS store_count
            FROM book_stores
            GROUP BY book_id
        )
        SELECT
            b.book_id,
            b.title,
            b.published_date,
            a.name AS author_name,
            p.name AS publisher_name,
            p.country AS publisher_country,
            rs.average_rating,
            COALESCE(sc.store_count, 0) AS available_in_stores
        FROM books b
        INNER JOIN authors a ON a.author_id = b.author_id
        INNER JOIN publishers p ON p.publisher_id = b.publisher_id
        INNER JOIN review_stats rs ON rs.book_id = b.book_id
        LEFT JOIN stock_counts sc ON sc.book_id = b.book_id
        WHERE rs.average_rating > ?
        ORDER BY rs.average_rating DESC, b.title
        "#,
    )
    .bind(threshold)
    .fetch_all(pool)
    .await?;

    Ok(books)
}

// ============================================================================
// STORE REPORTS
// ============================================================================

/// Every store with its distinct-book count and full book list
pub async fn store_report(pool: &SqlitePool) -> Result<Vec<StoreReportRow>> {
    let counts = sqlx::query_as::<_, StoreCountRow>(
        r#"
        SELECT
            s.store_id,
            s.name,
            s.city,
            COUNT(DISTINCT bs.book_id) AS book_count
        FROM stores s
        LEFT JOIN book_stores bs ON bs.store_id = s.store_id
        GROUP BY s.store_id
        ORDER BY s.name, s.city
        "#,
    )
    .fetch_all(pool)
    .await?;

    let book_rows = sqlx::query_as::<_, StoreBookRow>(
        r#"
        SELECT
            bs.store_id,
            b.book_id,
            b.title,
            b.published_date,
            a.name AS author_name,
            p.name AS publisher_name
        FROM book_stores bs
        INNER JOIN books b ON b.book_id = bs.book_id
        INNER JOIN authors a ON a.author_id = b.author_id
        INNER JOIN publishers p ON p.publisher_id = b.publisher_id
        ORDER BY bs.store_id, b.title
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(assemble_store_report(counts, book_rows))
}

/// Stores stocking at least one book published in or after the given year
///
/// The book count (and the preloaded book list) covers only such books;
/// stores with none are excluded. Ordered by count descending.
pub async fn store_report_by_year(pool: &SqlitePool, year: i32) -> Result<Vec<StoreReportRow>> {
    let counts = sqlx::query_as::<_, StoreCountRow>(
        r#"
        SELECT
            s.store_id,
            s.name,
            s.city,
            COUNT(DISTINCT bs.book_id) AS book_count
        FROM stores s
        INNER JOIN book_stores bs ON bs.store_id = s.store_id
        INNER JOIN books b ON b.book_id = bs.book_id
        WHERE CAST(strftime('%Y', b.published_date) AS INTEGER) >= ?
        GROUP BY s.store_id
        HAVING book_count > 0
        ORDER BY book_count DESC, s.name
        "#,
    )
    .bind(year)
    .fetch_all(pool)
    .await?;

    let book_rows = sqlx::query_as::<_, StoreBookRow>(
        r#"
        SELECT
            bs.store_id,
            b.book_id,
            b.title,
            b.published_date,
            a.name AS author_name,
            p.name AS publisher_name
        FROM book_stores bs
        INNER JOIN books b ON b.book_id = bs.book_id
        INNER JOIN authors a ON a.author_id = b.author_id
        INNER JOIN publishers p ON p.publisher_id = b.publisher_id
        WHERE CAST(strftime('%Y', b.published_date) AS INTEGER) >= ?
        ORDER BY bs.store_id, b.title
        "#,
    )
    .bind(year)
    .fetch_all(pool)
    .await?;

    Ok(assemble_store_report(counts, book_rows))
}

/// Single store with its rated book list and total book count
///
/// Fails with [`CatalogError::StoreNotFound`] for an unknown id.
pub async fn store_detail(pool: &SqlitePool, store_id: i64) -> Result<StoreDetail> {
    let store = queries::find_store_by_id(pool, store_id)
        .await?
        .ok_or(CatalogError::StoreNotFound(store_id))?;

    let books = sqlx::query_as::<_, RatedBook>(
        r#"
        WITH review_stats AS (
            SELECT book_id, ROUND(AVG(rating), 2) AS average_rating
            FROM reviews
            GROUP BY book_id
        )
        SELECT
            b.book_id,
            b.title,
            b.published_date,
            a.name AS author_name,
            p.name AS publisher_name,
            rs.average_rating
        FROM book_stores bs
        INNER JOIN books b ON b.book_id = bs.book_id
        INNER JOIN authors a ON a.author_id = b.author_id
        INNER JOIN publishers p ON p.publisher_id = b.publisher_id
        LEFT JOIN review_stats rs ON rs.book_id = b.book_id
        WHERE bs.store_id = ?
        ORDER BY b.title
        "#,
    )
    .bind(store_id)
    .fetch_all(pool)
    .await?;

    let book_count: i64 =
        sqlx::query_scalar("SELECT COUNT(DISTINCT book_id) FROM book_stores WHERE store_id = ?")
            .bind(store_id)
            .fetch_one(pool)
            .await?;

    Ok(StoreDetail {
        store,
        book_count,
        books,
    })
}

fn assemble_store_report(
    counts: Vec<StoreCountRow>,
    book_rows: Vec<StoreBookRow>,
) -> Vec<StoreReportRow> {
    let mut books_by_store: HashMap<i64, Vec<BookSummary>> = HashMap::new();
    for row in book_rows {
        books_by_store
            .entry(row.store_id)
            .or_default()
            .push(BookSummary {
                book_id: row.book_id,
                title: row.title,
                published_date: row.published_date,
                author_name: row.author_name,
                publisher_name: row.publisher_name,
            });
    }

    counts
        .into_iter()
        .map(|c| StoreReportRow {
            books: books_by_store.remove(&c.store_id).unwrap_or_default(),
            store_id: c.store_id,
            name: c.name,
            city: c.city,
            book_count: c.book_count,
        })
        .collect()
}
