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


//! HTTP server
//!
//! Read-only JSON API over the report queries. One route per report, each
//! taking a single path parameter:
//!
//! | Route | Result |
//! |---|---|
//! | `/` | all books |
//! | `/books/by_country/{country}` | annotated book list |
//! | `/books/by_city/{city}` | annotated book list |
//! | `/books/by_rating/{rating}` | annotated book list, or a message on bad input |
//! | `/stores/report` | store list with counts |
//! | `/stores/report/by_published_date/{year}` | filtered store list |
//! | `/store/{id}` | store detail or 404 |
//! | `/health` | liveness probe |

pub mod handlers;

use crate::storage::Database;
use axum::{routing::get, Router};
use std::net::SocketAddr;

/// Build the application router over a database handle
pub fn router(db: Database) -> Router {
    Router::new()
        .route("/", get(handlers::start_page))
        .route("/books/by_country/:country", get(handlers::books_by_country))
        .route("/books/by_city/:city", get(handlers::books_by_city))
        .route("/books/by_rating/:rating", get(handlers::books_by_rating))
        .route("/stores/report", get(handlers::store_report))
        .route(
            "/stores/report/by_published_date/:year",
            get(handlers::store_report_by_year),
        )
        .route("/store/:id", get(handlers::store_detail))
        .route("/health", get(handlers::health))
        .with_state(db)
}

/// Serve the API until ctrl-c
pub async fn serve(db: Database, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(db);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
