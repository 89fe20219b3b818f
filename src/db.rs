//! Sets up the application database.

use rusqlite::{Connection, TransactionBehavior, Transaction as SqlTransaction};

use crate::{Error, expense::create_expense_table, user::create_user_table};

/// Create the tables for the domain models if they do not already exist.
///
/// Foreign key enforcement is switched on for `connection` so that every
/// expense must belong to a registered user.
///
/// # Errors
/// Returns an [Error::SqlError] if any of the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("first initialization failed");
        initialize(&connection).expect("second initialization failed");
    }

    #[test]
    fn enables_foreign_keys() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        let foreign_keys: i64 = connection
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();

        assert_eq!(foreign_keys, 1);
    }
}
