//! Uniformity is the storefront backend for a school and corporate uniform retailer.
//!
//! This library provides a JSON API for browsing the product catalog and managing
//! customer accounts, plus a couple of server-rendered catalog pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod catalog;
mod company;
mod customer;
mod db;
mod document_store;
mod endpoints;
mod html;
mod logging;
mod resolver;
mod response;
mod routing;
#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use catalog::{
    Category, Item, NewCategory, NewItem, NewSubcategory, Subcategory, create_category,
    create_item, create_subcategory,
};
pub use company::{CompanySettings, save_company_settings};
pub use customer::PasswordHash;
pub use db::initialize as initialize_db;
pub use document_store::{Collection, DocumentStore, Field, Filter};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use resolver::{EntityKind, resolve};
pub use routing::build_router;

use crate::response::ApiMessage;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The email and password combination did not match a registered customer.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The email address is missing the '@' symbol or is empty.
    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    /// The phone number is too short to be a real phone number.
    #[error("{0} is not a valid phone number, it must have at least {min} characters", min = customer::PHONE_MIN_LENGTH)]
    InvalidPhone(String),

    /// A required name field was empty.
    #[error("first name cannot be empty")]
    EmptyName,

    /// The password is shorter than the minimum length.
    #[error("password must be at least {min} characters long", min = customer::PASSWORD_MIN_LENGTH)]
    PasswordTooShort,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The email address is already registered to another customer.
    #[error("email already registered")]
    DuplicateEmail,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a customer that does not exist
    #[error("tried to update a customer that is not in the database")]
    UpdateMissingCustomer,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("customer.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidEmail(_)
            | Error::InvalidPhone(_)
            | Error::EmptyName
            | Error::PasswordTooShort => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::DuplicateEmail => StatusCode::CONFLICT,
            Error::NotFound | Error::UpdateMissingCustomer => StatusCode::NOT_FOUND,
            Error::HashingError(_) | Error::SqlError(_) | Error::DatabaseLockError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Internal errors are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "An internal error occurred. Please try again later.".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(ApiMessage::failure(message))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{Error, test_utils::parse_json};

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[tokio::test]
    async fn validation_error_is_bad_request_with_message() {
        let response = Error::InvalidEmail("foo".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "foo is not a valid email address");
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let response = Error::HashingError("salt exploded".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = parse_json(response).await;
        let message = body["message"].as_str().expect("message should be a string");
        assert!(
            !message.contains("salt exploded"),
            "internal error details leaked to client: {message}"
        );
    }
}
