//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::database_id::ExpenseId;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The username does not belong to a registered user.
    ///
    /// This is distinct from a user that exists but has no matching expenses,
    /// which results in an empty list instead of an error.
    #[error("No user: {0}")]
    UserNotFound(String),

    /// The expense ID does not refer to an expense owned by the user.
    #[error("No expense: {0}")]
    ExpenseNotFound(ExpenseId),

    /// No route matches the requested path.
    #[error("No route: {0}")]
    RouteNotFound(String),

    /// An update was requested without any fields to change.
    #[error("at least one of amount, category, detail or date must be provided")]
    EmptyChangeSet,

    /// A blank string was used as an expense category.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// A month outside the range 1 to 12 was used to filter expenses.
    #[error("{0} is not a valid month, expected a number from 1 to 12")]
    InvalidMonth(u32),

    /// The request body or path could not be parsed.
    ///
    /// The string holds the reason given by the extractor that rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request body is larger than the server is willing to buffer.
    #[error("request body is too large")]
    PayloadTooLarge,

    /// The request did not include a bearer token.
    #[error("authentication required")]
    MissingToken,

    /// The bearer token could not be verified or has expired.
    #[error("invalid or expired token")]
    InvalidToken,

    /// The authenticated user tried to access another user's expenses.
    #[error("you do not have access to this resource")]
    Forbidden,

    /// A token could not be created.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("could not create token: {0}")]
    TokenCreation(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::UserNotFound(_) | Error::ExpenseNotFound(_) | Error::RouteNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Error::EmptyChangeSet
            | Error::EmptyCategory
            | Error::InvalidMonth(_)
            | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Error::MissingToken | Error::InvalidToken => StatusCode::UNAUTHORIZED,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::TokenCreation(_) | Error::DatabaseLockError | Error::SqlError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            // Internal details are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "Something went wrong, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}
