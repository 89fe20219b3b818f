//! A JSON REST API for recording and querying personal expenses.
//!
//! Each registered user owns a list of expenses. Every route is scoped to a
//! username in the path and guarded by a bearer token that must have been
//! issued to that same user. Expenses are stored in SQLite.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod database_id;
mod db;
mod endpoints;
mod error;
mod expense;
mod logging;
mod routing;
mod sql_patch;
mod user;

pub use app_state::AppState;
pub use auth::{Claims, create_token, decode_token};
pub use database_id::ExpenseId;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use expense::{
    Amount, Expense, ExpenseChanges, ExpenseFilter, NewExpense, create_expense, delete_expense,
    get_expense, list_expenses, update_expense,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use user::{User, create_user, get_user};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for the Ctrl+C signal: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
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
