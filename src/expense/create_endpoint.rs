use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{
        FromRef, OriginalUri, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::{ExpenseResponse, NewExpense, create_expense},
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new expense for the user in the path.
///
/// Responds with 201 Created, the new expense and a `Location` header with the
/// path for updating or deleting it.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<NewExpense>, JsonRejection>,
) -> Result<Response, Error> {
    let Path(username) = path?;
    let Json(new_expense) = payload?;
    new_expense.validate()?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let expense = create_expense(&username, new_expense, &connection)?;
    let location = format!("{}/{}", uri.path(), expense.id);

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(ExpenseResponse { expense }),
    )
        .into_response())
}
