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


//! Route handlers
//!
//! Each handler wraps one report query into a JSON response. Every list
//! response carries a human-readable `title` describing the query. Error
//! mapping follows the system's two fault classes: malformed rating input is
//! recovered in-handler (HTTP 200 with a message and an empty list), unknown
//! store ids surface as 404. Everything else is a 500.

use crate::error::CatalogError;
use crate::reports;
use crate::storage::Database;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Book/store list response with the page title the query was run under
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub items: Vec<T>,
}

impl<T: Serialize> ListResponse<T> {
    fn new(title: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            title: title.into(),
            message: None,
            items,
        }
    }
}

/// JSON error body for not-found and internal failures
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler-level error wrapper mapping CatalogError onto HTTP statuses
pub struct ApiError(CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = if self.0.is_not_found() {
            (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: self.0.to_string(),
                },
            )
        } else {
            tracing::error!(error = %self.0, "request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "internal server error".to_string(),
                },
            )
        };

        (status, Json(body)).into_response()
    }
}

type HandlerResult<T> = std::result::Result<Json<T>, ApiError>;

/// `GET /` - all books
pub async fn start_page(
    State(db): State<Database>,
) -> HandlerResult<ListResponse<reports::BookSummary>> {
    let books = reports::list_books(db.pool()).await?;
    Ok(Json(ListResponse::new("All books", books)))
}

/// `GET /books/by_country/{country}`
pub async fn books_by_country(
    State(db): State<Database>,
    Path(country): Path<String>,
) -> HandlerResult<ListResponse<reports::BookReportRow>> {
    let books = reports::books_by_country(db.pool(), &country).await?;
    Ok(Json(ListResponse::new(
        format!("Books by country {country}"),
        books,
    )))
}

/// `GET /books/by_city/{city}`
pub async fn books_by_city(
    State(db): State<Database>,
    Path(city): Path<String>,
) -> HandlerResult<ListResponse<reports::BookReportRow>> {
    let books = reports::books_by_city(db.pool(), &city).await?;
    Ok(Json(ListResponse::new(
        format!("Books available in {city}"),
        books,
    )))
}

/// `GET /books/by_rating/{rating}`
///
/// A non-numeric rating is user error, not a server fault: the response is
/// an empty list with an explanatory message, HTTP 200.
pub async fn books_by_rating(
    State(db): State<Database>,
    Path(rating): Path<String>,
) -> HandlerResult<ListResponse<reports::BookReportRow>> {
    let threshold: f64 = match rating.parse() {
        Ok(value) => value,
        Err(_) => {
            return Ok(Json(ListResponse {
                title: format!("Books rated above {rating}"),
                message: Some(format!(
                    "Invalid rating '{rating}': expected a number"
                )),
                items: Vec::new(),
            }));
        }
    };

    let books = reports::books_by_rating(db.pool(), threshold).await?;
    Ok(Json(ListResponse::new(
        format!("Books rated above {threshold}"),
        books,
    )))
}

/// `GET /stores/report`
pub async fn store_report(
    State(db): State<Database>,
) -> HandlerResult<ListResponse<reports::StoreReportRow>> {
    let stores = reports::store_report(db.pool()).await?;
    Ok(Json(ListResponse::new("Store inventory report", stores)))
}

/// `GET /stores/report/by_published_date/{year}`
pub async fn store_report_by_year(
    State(db): State<Database>,
    Path(year): Path<i32>,
) -> HandlerResult<ListResponse<reports::StoreReportRow>> {
    let stores = reports::store_report_by_year(db.pool(), year).await?;
    Ok(Json(ListResponse::new(
        format!("Stores with books published in or after {year}"),
        stores,
    )))
}

/// `GET /store/{id}` - 404 for unknown ids
pub async fn store_detail(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> HandlerResult<reports::StoreDetail> {
    let detail = reports::store_detail(db.pool(), id).await?;
    Ok(Json(detail))
}

/// `GET /health` - liveness probe
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
