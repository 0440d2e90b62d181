//! Database models for Bookyard
//!
//! Entity structs for the catalog schema plus `New*` payloads for inserts.
//!
//! # SQLite Adaptations
//! - Dates stored as TEXT in ISO 8601 format (`YYYY-MM-DD`)
//! - Timestamps stored as TEXT, decoded as `DateTime<Utc>`
//! - The Book <-> Store many-to-many relationship uses a junction table

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lowest permitted review rating
pub const RATING_MIN: i32 = 0;
/// Highest permitted review rating
pub const RATING_MAX: i32 = 10;
/// Longest permitted review comment, in characters
pub const COMMENT_MAX_CHARS: usize = 1000;

// ============================================================================
// MAIN ENTITIES
// ============================================================================

/// User account, referenced by the audit metadata of every audited entity
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Author entity
///
/// Deleting an author cascades to their books.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Author {
    pub author_id: i64,
    pub name: String,
    pub bio: String,

    // Audit metadata
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Publisher entity
///
/// Deletion is blocked by the schema while any book references the publisher.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Publisher {
    pub publisher_id: i64,
    pub name: String,
    pub country: String,

    // Audit metadata
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Store entity - the one entity without audit metadata
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Store {
    pub store_id: i64,
    pub name: String,
    pub city: String,
}

/// Book entity - core catalog entry
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Book {
    pub book_id: i64,
    pub title: String,
    pub published_date: NaiveDate,
    pub description: String,

    pub author_id: i64,
    pub publisher_id: i64,

    // Audit metadata
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Review entity - a single rating with comment for one book
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Review {
    pub review_id: i64,
    pub book_id: i64,
    pub rating: i32,
    pub comment: String,

    // Audit metadata
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

// ============================================================================
// JUNCTION TABLES (Many-to-Many Relationships)
// ============================================================================

/// BookStore - junction row recording that a store stocks a book
///
/// Composite primary key: (book_id, store_id)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BookStore {
    pub book_id: i64,
    pub store_id: i64,
}

// ============================================================================
// NEW RECORD STRUCTS (for inserts)
// ============================================================================

/// New author record for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    pub bio: String,
    pub creator_id: i64,
}

impl NewAuthor {
    pub fn new(name: String, creator_id: i64) -> Self {
        Self {
            name,
            bio: String::new(),
            creator_id,
        }
    }
}

/// New publisher record for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPublisher {
    pub name: String,
    pub country: String,
    pub creator_id: i64,
}

impl NewPublisher {
    pub fn new(name: String, country: String, creator_id: i64) -> Self {
        Self {
            name,
            country,
            creator_id,
        }
    }
}

/// New store record for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStore {
    pub name: String,
    pub city: String,
}

impl NewStore {
    pub fn new(name: String, city: String) -> Self {
        Self { name, city }
    }
}

/// New book record for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub published_date: NaiveDate,
    pub description: String,
    pub author_id: i64,
    pub publisher_id: i64,
    pub creator_id: i64,
}

impl NewBook {
    pub fn new(
        title: String,
        published_date: NaiveDate,
        author_id: i64,
        publisher_id: i64,
        creator_id: i64,
    ) -> Self {
        Self {
            title,
            published_date,
            description: String::new(),
            author_id,
            publisher_id,
            creator_id,
        }
    }
}

/// New review record for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub book_id: i64,
    pub rating: i32,
    pub comment: String,
    pub creator_id: i64,
}

impl NewReview {
    /// Build a review payload. Out-of-range ratings are clamped to
    /// [`RATING_MIN`]..=[`RATING_MAX`].
    pub fn new(book_id: i64, rating: i32, comment: String, creator_id: i64) -> Self {
        Self {
            book_id,
            rating: rating.clamp(RATING_MIN, RATING_MAX),
            comment,
            creator_id,
        }
    }
}
