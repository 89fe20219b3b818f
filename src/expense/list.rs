//! Queries for listing a user's expenses.

use rusqlite::{Connection, params_from_iter, types::Value};

use crate::{
    Error,
    expense::{
        Expense,
        core::{EXPENSE_COLUMNS, map_expense_row},
    },
    user::ensure_user_exists,
};

/// Selects which of a user's expenses to list.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseFilter {
    /// Every expense.
    All,
    /// Expenses whose category is exactly this string.
    Category(String),
    /// Expenses dated in this calendar year.
    Year(i32),
    /// Expenses dated in this month (1 to 12) of this calendar year.
    Month {
        /// The calendar year.
        year: i32,
        /// The month of the year, from 1 to 12.
        month: u32,
    },
}

impl ExpenseFilter {
    /// The SQL condition for the filter and the values to bind to it.
    ///
    /// Parameter numbering starts at `?2` because `?1` is always the owner.
    fn to_sql_condition(&self) -> Result<Option<(&'static str, Vec<Value>)>, Error> {
        let condition = match self {
            ExpenseFilter::All => None,
            ExpenseFilter::Category(category) => {
                Some(("category = ?2", vec![Value::Text(category.clone())]))
            }
            ExpenseFilter::Year(year) => Some((
                "CAST(strftime('%Y', date) AS INTEGER) = ?2",
                vec![Value::Integer(i64::from(*year))],
            )),
            ExpenseFilter::Month { year, month } => {
                if !(1..=12).contains(month) {
                    return Err(Error::InvalidMonth(*month));
                }

                Some((
                    "CAST(strftime('%Y', date) AS INTEGER) = ?2 \
                     AND CAST(strftime('%m', date) AS INTEGER) = ?3",
                    vec![
                        Value::Integer(i64::from(*year)),
                        Value::Integer(i64::from(*month)),
                    ],
                ))
            }
        };

        Ok(condition)
    }
}

/// Get the expenses owned by `owner` that match `filter`, in the order they were created.
///
/// A user with no matching expenses gets an empty list.
///
/// # Errors
/// This function will return a:
/// - [Error::UserNotFound] if `owner` is not a registered user,
/// - [Error::InvalidMonth] if a month filter is outside 1 to 12,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn list_expenses(
    owner: &str,
    filter: &ExpenseFilter,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    let condition = filter.to_sql_condition()?;

    ensure_user_exists(owner, connection)?;

    let mut query = format!("SELECT {EXPENSE_COLUMNS} FROM expense WHERE username = ?1");
    let mut values = vec![Value::Text(owner.to_owned())];

    if let Some((sql, filter_values)) = condition {
        query.push_str(" AND ");
        query.push_str(sql);
        values.extend(filter_values);
    }

    query.push_str(" ORDER BY id ASC");

    connection
        .prepare(&query)?
        .query_map(params_from_iter(values.iter()), map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::from))
        .collect()
}
