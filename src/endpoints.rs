//! The API endpoints URIs.
//!
//! The expense routes are relative to [EXPENSES_ROOT], which they are nested under.

/// The prefix that all expense routes are nested under.
pub const EXPENSES_ROOT: &str = "/expenses";
/// The route for creating and listing a user's expenses.
pub const USER_EXPENSES: &str = "/{username}";
/// The route for listing a user's expenses in one category.
pub const EXPENSES_BY_CATEGORY: &str = "/{username}/category/{category}";
/// The route for listing a user's expenses in one year.
pub const EXPENSES_BY_YEAR: &str = "/{username}/year/{year}";
/// The route for listing a user's expenses in one month.
pub const EXPENSES_BY_MONTH: &str = "/{username}/year/{year}/month/{month}";
/// The route for updating and deleting a single expense.
pub const EXPENSE: &str = "/{username}/{expense_id}";

/// Replace the parameters in `endpoint_path` with `params`, in order.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/{username}/{expense_id}', '{username}'
/// and '{expense_id}' are the parameters.
///
/// Parameters left over after `params` runs out are kept as is.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, params: &[&str]) -> String {
    let mut formatted = String::with_capacity(endpoint_path.len());
    let mut rest = endpoint_path;
    let mut params = params.iter();

    while let Some(start) = rest.find('{') {
        let Some(end) = rest[start..].find('}').map(|offset| start + offset + 1) else {
            break;
        };
        let Some(param) = params.next() else {
            break;
        };

        formatted.push_str(&rest[..start]);
        formatted.push_str(param);
        rest = &rest[end..];
    }

    formatted.push_str(rest);
    formatted
}
