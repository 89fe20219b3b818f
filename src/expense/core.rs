//! Defines the core data models and database queries for expenses.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::ExpenseId, expense::Amount};

// ============================================================================
// MODELS
// ============================================================================

/// A single financial transaction owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// How much money was spent (or refunded, if negative).
    pub amount: Amount,
    /// A short free-form label, e.g. "food" or "rent".
    pub category: String,
    /// A text description of what the expense was for.
    pub detail: String,
    /// When the expense happened.
    pub date: Date,
    /// The user the expense belongs to.
    pub username: String,
}

/// The fields needed to create an [Expense].
///
/// The owner and ID are not part of the request body: the owner comes from the
/// request path and the ID is generated by the database.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewExpense {
    /// How much money was spent.
    pub amount: Amount,
    /// A short free-form label, must not be blank.
    pub category: String,
    /// A text description of what the expense was for.
    pub detail: String,
    /// When the expense happened.
    pub date: Date,
}

/// The JSON body sent in response to creating or updating an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseResponse {
    /// The expense as stored after the request.
    pub expense: Expense,
}

impl NewExpense {
    /// Check the fields that cannot be checked by deserialization alone.
    ///
    /// # Errors
    /// Returns [Error::EmptyCategory] if the category is blank.
    pub fn validate(&self) -> Result<(), Error> {
        validate_category(&self.category)
    }
}

/// Check that `category` is not empty or only whitespace.
pub(crate) fn validate_category(category: &str) -> Result<(), Error> {
    if category.trim().is_empty() {
        return Err(Error::EmptyCategory);
    }

    Ok(())
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Columns selected by every expense query, in the order [map_expense_row] expects.
pub(crate) const EXPENSE_COLUMNS: &str = "id, amount, category, detail, date, username";

/// Create a new expense owned by `owner`.
///
/// # Errors
/// This function will return a:
/// - [Error::UserNotFound] if `owner` does not refer to a registered user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_expense(
    owner: &str,
    new_expense: NewExpense,
    connection: &Connection,
) -> Result<Expense, Error> {
    let expense = connection
        .prepare(&format!(
            "INSERT INTO expense (amount, category, detail, date, username)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {EXPENSE_COLUMNS}"
        ))?
        .query_row(
            (
                new_expense.amount,
                new_expense.category,
                new_expense.detail,
                new_expense.date,
                owner,
            ),
            map_expense_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::UserNotFound(owner.to_owned()),
            error => error.into(),
        })?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::ExpenseNotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_expense_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::ExpenseNotFound(id),
            error => error.into(),
        })
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount TEXT NOT NULL,
                category TEXT NOT NULL,
                detail TEXT NOT NULL,
                date TEXT NOT NULL,
                username TEXT NOT NULL,
                FOREIGN KEY(username) REFERENCES user(username) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Every read filters by owner.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_username ON expense(username);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
pub(crate) fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let category = row.get(2)?;
    let detail = row.get(3)?;
    let date = row.get(4)?;
    let username = row.get(5)?;

    Ok(Expense {
        id,
        amount,
        category,
        detail,
        date,
        username,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use time::macros::date;

    use crate::{
        Error,
        expense::{
            NewExpense, create_expense, get_expense,
            test_utils::{create_test_user, get_test_connection, new_expense},
        },
    };

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        create_test_user("alice", &conn);

        let expense = create_expense(
            "alice",
            new_expense("42.50", "food", "lunch", date!(2024 - 03 - 15)),
            &conn,
        )
        .expect("could not create expense");

        assert!(expense.id > 0);
        assert_eq!(expense.amount.to_string(), "42.50");
        assert_eq!(expense.category, "food");
        assert_eq!(expense.detail, "lunch");
        assert_eq!(expense.date, date!(2024 - 03 - 15));
        assert_eq!(expense.username, "alice");
    }

    #[test]
    fn create_assigns_distinct_ids() {
        let conn = get_test_connection();
        create_test_user("alice", &conn);
        let today = date!(2024 - 03 - 15);

        let first = create_expense("alice", new_expense("1", "a", "", today), &conn).unwrap();
        let second = create_expense("alice", new_expense("2", "b", "", today), &conn).unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn create_fails_for_unknown_owner() {
        let conn = get_test_connection();

        let result = create_expense(
            "nobody",
            new_expense("1.00", "food", "", date!(2024 - 03 - 15)),
            &conn,
        );

        assert_eq!(result, Err(Error::UserNotFound("nobody".to_owned())));
    }

    #[test]
    fn get_returns_created_expense() {
        let conn = get_test_connection();
        create_test_user("alice", &conn);
        let created = create_expense(
            "alice",
            new_expense("-12.00", "refund", "returned shoes", date!(2024 - 01 - 02)),
            &conn,
        )
        .unwrap();

        let retrieved = get_expense(created.id, &conn).unwrap();

        assert_eq!(retrieved, created);
    }

    #[test]
    fn get_fails_with_unknown_id() {
        let conn = get_test_connection();

        assert_eq!(get_expense(999, &conn), Err(Error::ExpenseNotFound(999)));
    }

    #[test]
    fn blank_category_fails_validation() {
        let expense = NewExpense {
            category: "   ".to_owned(),
            ..new_expense("1.00", "food", "", date!(2024 - 03 - 15))
        };

        assert_eq!(expense.validate(), Err(Error::EmptyCategory));
    }
}
