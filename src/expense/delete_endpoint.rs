use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, database_id::ExpenseId, expense::delete_expense};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON body sent in response to deleting an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedResponse {
    /// The ID of the deleted expense.
    pub deleted: ExpenseId,
}

/// A route handler for deleting an expense, responds with the deleted ID.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    path: Result<Path<(String, ExpenseId)>, PathRejection>,
) -> Result<Response, Error> {
    let Path((username, expense_id)) = path?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    delete_expense(expense_id, &username, &connection)?;

    Ok(Json(DeletedResponse {
        deleted: expense_id,
    })
    .into_response())
}
