//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use jsonwebtoken::DecodingKey;
use rusqlite::Connection;

use crate::{Error, db::initialize};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The key used to verify bearer tokens.
    pub decoding_key: DecodingKey,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `jwt_secret` must be the same secret that was used to sign the tokens handed out to users.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, jwt_secret: &str) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::AppState;

    #[test]
    fn new_initializes_database() {
        let state = AppState::new(Connection::open_in_memory().unwrap(), "secret").unwrap();

        let connection = state.db_connection.lock().unwrap();
        let table_count: i64 = connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('user', 'expense')",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(table_count, 2);
    }
}
