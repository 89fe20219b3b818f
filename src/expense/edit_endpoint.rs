use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{
        FromRef, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    expense::{ExpenseChanges, ExpenseResponse, update_expense},
};

/// The state needed to edit an expense.
#[derive(Debug, Clone)]
pub struct EditExpenseState {
    /// The database connection for managing expenses.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for changing some of the fields of an expense.
///
/// Responds with the expense after the changes were applied.
pub async fn update_expense_endpoint(
    State(state): State<EditExpenseState>,
    path: Result<Path<(String, ExpenseId)>, PathRejection>,
    payload: Result<Json<ExpenseChanges>, JsonRejection>,
) -> Result<Response, Error> {
    let Path((username, expense_id)) = path?;
    let Json(changes) = payload?;
    changes.validate()?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let expense = update_expense(expense_id, &username, changes, &connection)?;

    Ok(Json(ExpenseResponse { expense }).into_response())
}
