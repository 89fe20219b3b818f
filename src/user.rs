//! Code for creating the user table and checking that users exist.
//!
//! Users are read-only as far as expenses are concerned: expenses reference a
//! user by username, but no expense operation creates, updates or deletes users.

use rusqlite::{Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A user of the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The unique name the user is identified by.
    pub username: String,
    /// The user's first name.
    pub first_name: String,
    /// The user's last name.
    pub last_name: String,
    /// The user's email address.
    pub email: String,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                username TEXT PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE
                )",
        (),
    )?;

    Ok(())
}

/// Insert a new user into the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred, e.g. the
/// username or email is already taken.
pub fn create_user(user: &User, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO user (username, first_name, last_name, email) VALUES (?1, ?2, ?3, ?4)",
        (
            &user.username,
            &user.first_name,
            &user.last_name,
            &user.email,
        ),
    )?;

    Ok(())
}

/// Get the user with the name `username`.
///
/// # Errors
///
/// This function will return a:
/// - [Error::UserNotFound] if `username` does not belong to a registered user,
/// - or [Error::SqlError] if there was an error trying to access the database.
pub fn get_user(username: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(
            "SELECT username, first_name, last_name, email FROM user WHERE username = :username",
        )?
        .query_row(&[(":username", &username)], |row| {
            Ok(User {
                username: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                email: row.get(3)?,
            })
        })
        .optional()?
        .ok_or_else(|| Error::UserNotFound(username.to_owned()))
}

/// Check that `username` belongs to a registered user.
///
/// # Errors
///
/// This function will return a:
/// - [Error::UserNotFound] if `username` does not belong to a registered user,
/// - or [Error::SqlError] if there was an error trying to access the database.
pub fn ensure_user_exists(username: &str, connection: &Connection) -> Result<(), Error> {
    let exists: bool = connection.query_row(
        "SELECT EXISTS(SELECT 1 FROM user WHERE username = ?1)",
        (username,),
        |row| row.get(0),
    )?;

    if exists {
        Ok(())
    } else {
        Err(Error::UserNotFound(username.to_owned()))
    }
}

#[cfg(test)]
mod user_tests {
    use rusqlite::Connection;

    use crate::{Error, db::initialize};

    use super::{User, create_user, ensure_user_exists, get_user};

    fn get_db_connection() -> Connection {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        initialize(&conn).expect("Could not initialize database");

        conn
    }

    fn test_user() -> User {
        User {
            username: "alice".to_owned(),
            first_name: "Alice".to_owned(),
            last_name: "Liddell".to_owned(),
            email: "alice@example.com".to_owned(),
        }
    }

    #[test]
    fn get_user_succeeds_after_insert() {
        let db_connection = get_db_connection();
        let user = test_user();
        create_user(&user, &db_connection).unwrap();

        let retrieved_user = get_user("alice", &db_connection).unwrap();

        assert_eq!(retrieved_user, user);
    }

    #[test]
    fn get_user_fails_with_unknown_username() {
        let db_connection = get_db_connection();

        assert_eq!(
            get_user("bob", &db_connection),
            Err(Error::UserNotFound("bob".to_owned()))
        );
    }

    #[test]
    fn insert_user_fails_on_duplicate_username() {
        let db_connection = get_db_connection();
        create_user(&test_user(), &db_connection).unwrap();

        let duplicate = User {
            email: "other@example.com".to_owned(),
            ..test_user()
        };

        assert!(matches!(
            create_user(&duplicate, &db_connection),
            Err(Error::SqlError(_))
        ));
    }

    #[test]
    fn ensure_user_exists_distinguishes_users() {
        let db_connection = get_db_connection();
        create_user(&test_user(), &db_connection).unwrap();

        assert_eq!(ensure_user_exists("alice", &db_connection), Ok(()));
        assert_eq!(
            ensure_user_exists("bob", &db_connection),
            Err(Error::UserNotFound("bob".to_owned()))
        );
    }
}
