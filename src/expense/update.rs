//! Partial updates and deletion of expenses.

use rusqlite::{Connection, params_from_iter, types::Value};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{
        Amount, Expense,
        core::{EXPENSE_COLUMNS, map_expense_row, validate_category},
    },
    sql_patch::SetClause,
};

/// The fields to change on an existing expense.
///
/// Fields that are `None` keep their stored value. At least one field must be
/// set for the change-set to be applied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpenseChanges {
    /// The new amount.
    #[serde(default)]
    pub amount: Option<Amount>,
    /// The new category, must not be blank.
    #[serde(default)]
    pub category: Option<String>,
    /// The new description.
    #[serde(default)]
    pub detail: Option<String>,
    /// The new date.
    #[serde(default)]
    pub date: Option<Date>,
}

impl ExpenseChanges {
    /// Whether the change-set does not change anything.
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.detail.is_none()
            && self.date.is_none()
    }

    /// Check the change-set can be applied.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyChangeSet] if no fields are set,
    /// - or [Error::EmptyCategory] if the new category is blank.
    pub fn validate(&self) -> Result<(), Error> {
        if self.is_empty() {
            return Err(Error::EmptyChangeSet);
        }

        if let Some(category) = &self.category {
            validate_category(category)?;
        }

        Ok(())
    }

    fn into_set_clause(self) -> SetClause {
        let mut clause = SetClause::default();

        if let Some(amount) = self.amount {
            clause.set("amount", Value::Text(amount.to_string()));
        }

        if let Some(category) = self.category {
            clause.set("category", Value::Text(category));
        }

        if let Some(detail) = self.detail {
            clause.set("detail", Value::Text(detail));
        }

        if let Some(date) = self.date {
            clause.set("date", Value::Text(date.to_string()));
        }

        clause
    }
}

/// Apply `changes` to the expense `id` owned by `owner` and return the updated expense.
///
/// Expenses owned by other users are treated the same as missing expenses.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyChangeSet] if `changes` does not set any field, in which
///   case the database is not touched,
/// - [Error::EmptyCategory] if the new category is blank,
/// - [Error::ExpenseNotFound] if `id` does not refer to an expense owned by `owner`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_expense(
    id: ExpenseId,
    owner: &str,
    changes: ExpenseChanges,
    connection: &Connection,
) -> Result<Expense, Error> {
    changes.validate()?;

    let clause = changes.into_set_clause();
    let id_index = clause.next_parameter_index();
    let query = format!(
        "UPDATE expense SET {} WHERE id = ?{} AND username = ?{} RETURNING {EXPENSE_COLUMNS}",
        clause.assignments(),
        id_index,
        id_index + 1,
    );

    let mut values = clause.into_values();
    values.push(Value::Integer(id));
    values.push(Value::Text(owner.to_owned()));

    connection
        .prepare(&query)?
        .query_row(params_from_iter(values.iter()), map_expense_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::ExpenseNotFound(id),
            error => error.into(),
        })
}

/// Delete the expense `id` owned by `owner`.
///
/// # Errors
/// This function will return a:
/// - [Error::ExpenseNotFound] if `id` does not refer to an expense owned by `owner`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_expense(id: ExpenseId, owner: &str, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM expense WHERE id = ?1 AND username = ?2",
        (id, owner),
    )?;

    if rows_affected == 0 {
        return Err(Error::ExpenseNotFound(id));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        expense::{
            Expense, ExpenseChanges, ExpenseFilter, create_expense, delete_expense, get_expense,
            list_expenses,
            test_utils::{create_test_user, get_test_connection, new_expense},
            update_expense,
        },
    };

    fn setup() -> (rusqlite::Connection, Expense) {
        let conn = get_test_connection();
        create_test_user("alice", &conn);
        let expense = create_expense(
            "alice",
            new_expense("42.50", "food", "lunch", date!(2024 - 03 - 15)),
            &conn,
        )
        .unwrap();

        (conn, expense)
    }

    #[test]
    fn updates_only_present_fields() {
        let (conn, original) = setup();

        let updated = update_expense(
            original.id,
            "alice",
            ExpenseChanges {
                detail: Some("dinner".to_owned()),
                ..Default::default()
            },
            &conn,
        )
        .unwrap();

        assert_eq!(
            updated,
            Expense {
                detail: "dinner".to_owned(),
                ..original.clone()
            }
        );
        assert_eq!(get_expense(original.id, &conn).unwrap(), updated);
    }

    #[test]
    fn updates_all_fields() {
        let (conn, original) = setup();
        let changes = ExpenseChanges {
            amount: Some("-3.1".parse().unwrap()),
            category: Some("refund".to_owned()),
            detail: Some("returned".to_owned()),
            date: Some(date!(2023 - 12 - 31)),
        };

        let updated = update_expense(original.id, "alice", changes, &conn).unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.amount.to_string(), "-3.10");
        assert_eq!(updated.category, "refund");
        assert_eq!(updated.detail, "returned");
        assert_eq!(updated.date, date!(2023 - 12 - 31));
        assert_eq!(updated.username, "alice");
    }

    #[test]
    fn empty_change_set_is_rejected_and_row_is_unchanged() {
        let (conn, original) = setup();

        let result = update_expense(original.id, "alice", ExpenseChanges::default(), &conn);

        assert_eq!(result, Err(Error::EmptyChangeSet));
        assert_eq!(get_expense(original.id, &conn).unwrap(), original);
    }

    #[test]
    fn blank_category_is_rejected() {
        let (conn, original) = setup();

        let result = update_expense(
            original.id,
            "alice",
            ExpenseChanges {
                category: Some("".to_owned()),
                ..Default::default()
            },
            &conn,
        );

        assert_eq!(result, Err(Error::EmptyCategory));
        assert_eq!(get_expense(original.id, &conn).unwrap(), original);
    }

    #[test]
    fn update_unknown_id_fails() {
        let (conn, _) = setup();

        let result = update_expense(
            999,
            "alice",
            ExpenseChanges {
                detail: Some("x".to_owned()),
                ..Default::default()
            },
            &conn,
        );

        assert_eq!(result, Err(Error::ExpenseNotFound(999)));
    }

    #[test]
    fn cannot_update_another_users_expense() {
        let (conn, original) = setup();
        create_test_user("mallory", &conn);

        let result = update_expense(
            original.id,
            "mallory",
            ExpenseChanges {
                amount: Some("0".parse().unwrap()),
                ..Default::default()
            },
            &conn,
        );

        assert_eq!(result, Err(Error::ExpenseNotFound(original.id)));
        assert_eq!(get_expense(original.id, &conn).unwrap(), original);
    }

    #[test]
    fn delete_removes_expense() {
        let (conn, original) = setup();

        delete_expense(original.id, "alice", &conn).unwrap();

        assert_eq!(
            get_expense(original.id, &conn),
            Err(Error::ExpenseNotFound(original.id))
        );
    }

    #[test]
    fn delete_unknown_id_fails_without_side_effects() {
        let (conn, original) = setup();

        assert_eq!(
            delete_expense(999, "alice", &conn),
            Err(Error::ExpenseNotFound(999))
        );
        assert_eq!(
            list_expenses("alice", &ExpenseFilter::All, &conn).unwrap(),
            vec![original]
        );
    }

    #[test]
    fn cannot_delete_another_users_expense() {
        let (conn, original) = setup();
        create_test_user("mallory", &conn);

        assert_eq!(
            delete_expense(original.id, "mallory", &conn),
            Err(Error::ExpenseNotFound(original.id))
        );
        assert_eq!(get_expense(original.id, &conn).unwrap(), original);
    }

    #[test]
    fn change_set_deserializes_partial_body() {
        let changes: ExpenseChanges =
            serde_json::from_str(r#"{"category": "travel"}"#).unwrap();

        assert_eq!(
            changes,
            ExpenseChanges {
                category: Some("travel".to_owned()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn change_set_rejects_unknown_fields() {
        let result = serde_json::from_str::<ExpenseChanges>(r#"{"username": "mallory"}"#);

        assert!(result.is_err());
    }
}
