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


//! Database storage and models
//!
//! This module handles all database operations using SQLite via sqlx.
//!
//! # Database Schema
//! - users: Creator accounts referenced by audit fields
//! - authors: Book authors (1:N books, delete cascades to books)
//! - publishers: Publishers with country (delete blocked while books exist)
//! - stores: Book stores with city (no audit fields)
//! - books: Core catalog entries
//! - book_stores: Book <-> Store junction (stocking)
//! - reviews: Per-book ratings 0-10 with comments (delete of book cascades)
//!
//! All entities except Store carry audit metadata: creator reference plus
//! created/updated/deleted timestamps. Records are only ever inserted by the
//! code in this crate; deletion policies exist purely as foreign-key rules.
//!
//! # Usage Example
//! ```no_run
//! use bookyard::storage::{Database, queries, models::NewAuthor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("./catalog.db").await?;
//!
//! let user_id = queries::insert_user(db.pool(), "librarian").await?;
//! let author = NewAuthor::new("Ursula K. Le Guin".to_string(), user_id);
//! let author_id = queries::insert_author(db.pool(), &author).await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

// Re-export commonly used types
pub use database::Database;
pub use models::{
    Author, Book, BookStore, NewAuthor, NewBook, NewPublisher, NewReview, NewStore, Publisher,
    Review, Store, User,
};
