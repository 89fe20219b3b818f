use rusqlite::Connection;
use time::Date;

use crate::{
    db::initialize,
    expense::NewExpense,
    user::{User, create_user},
};

pub fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().expect("could not create in-memory SQLite database");
    initialize(&conn).expect("could not initialize test DB");
    conn
}

#[track_caller]
pub fn create_test_user(username: &str, connection: &Connection) {
    create_user(
        &User {
            username: username.to_owned(),
            first_name: "Test".to_owned(),
            last_name: "User".to_owned(),
            email: format!("{username}@example.com"),
        },
        connection,
    )
    .expect("could not create test user");
}

#[track_caller]
pub fn new_expense(amount: &str, category: &str, detail: &str, date: Date) -> NewExpense {
    NewExpense {
        amount: amount.parse().expect("invalid test amount"),
        category: category.to_owned(),
        detail: detail.to_owned(),
        date,
    }
}
