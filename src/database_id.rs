//! Database ID type definitions.

/// Alias for the integer type used for expense IDs.
///
/// Expense IDs are generated by the database and are never reused, even after
/// the expense has been deleted.
pub type ExpenseId = i64;
