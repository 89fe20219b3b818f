//! Expense management for the expense tracker.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model, its exact decimal `Amount` and the request bodies for creating and editing expenses
//! - Database functions for storing, listing, updating and deleting a user's expenses
//! - The JSON route handlers that expose those functions over HTTP

mod amount;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod list;
mod list_endpoint;
mod update;

#[cfg(test)]
mod test_utils;

pub use amount::Amount;
pub use core::{
    Expense, ExpenseResponse, NewExpense, create_expense, create_expense_table, get_expense,
};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use edit_endpoint::update_expense_endpoint;
pub use list::{ExpenseFilter, list_expenses};
pub use list_endpoint::{
    list_expenses_by_category_endpoint, list_expenses_by_month_endpoint,
    list_expenses_by_year_endpoint, list_expenses_endpoint,
};
pub use update::{ExpenseChanges, delete_expense, update_expense};

#[cfg(test)]
pub use delete_endpoint::DeletedResponse;
#[cfg(test)]
pub use list_endpoint::ExpenseListResponse;
