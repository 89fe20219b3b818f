use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    expense::{Expense, ExpenseFilter, list_expenses},
};

/// The state needed to list expenses.
#[derive(Debug, Clone)]
pub struct ListExpensesState {
    /// The database connection for managing expenses.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListExpensesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON body sent in response to listing expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    /// The matching expenses, oldest first.
    pub expenses: Vec<Expense>,
}

fn respond_with_expenses(
    state: &ListExpensesState,
    username: &str,
    filter: ExpenseFilter,
) -> Result<Response, Error> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let expenses = list_expenses(username, &filter, &connection)?;

    Ok(Json(ExpenseListResponse { expenses }).into_response())
}

/// A route handler for listing all of a user's expenses.
pub async fn list_expenses_endpoint(
    State(state): State<ListExpensesState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, Error> {
    let Path(username) = path?;

    respond_with_expenses(&state, &username, ExpenseFilter::All)
}

/// A route handler for listing a user's expenses in a single category.
pub async fn list_expenses_by_category_endpoint(
    State(state): State<ListExpensesState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Response, Error> {
    let Path((username, category)) = path?;

    respond_with_expenses(&state, &username, ExpenseFilter::Category(category))
}

/// A route handler for listing a user's expenses in a calendar year.
pub async fn list_expenses_by_year_endpoint(
    State(state): State<ListExpensesState>,
    path: Result<Path<(String, i32)>, PathRejection>,
) -> Result<Response, Error> {
    let Path((username, year)) = path?;

    respond_with_expenses(&state, &username, ExpenseFilter::Year(year))
}

/// A route handler for listing a user's expenses in a month of a calendar year.
pub async fn list_expenses_by_month_endpoint(
    State(state): State<ListExpensesState>,
    path: Result<Path<(String, i32, u32)>, PathRejection>,
) -> Result<Response, Error> {
    let Path((username, year, month)) = path?;

    respond_with_expenses(&state, &username, ExpenseFilter::Month { year, month })
}
