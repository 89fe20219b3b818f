//! Builds the `SET` clause of a partial SQL `UPDATE` from a sparse set of changes.

use rusqlite::types::Value;

/// The column assignments and bound values for a partial update.
///
/// Each assignment uses a numbered positional parameter (`?1`, `?2`, ...), in
/// the order the columns were added. Parameters for the `WHERE` clause should
/// start at [SetClause::next_parameter_index]. An empty clause produces an
/// invalid `UPDATE` statement, so callers must set at least one column.
///
/// ```ignore
/// let mut clause = SetClause::default();
/// clause.set("category", Value::Text("food".to_owned()));
/// clause.set("detail", Value::Text("lunch".to_owned()));
///
/// assert_eq!(clause.assignments(), "category = ?1, detail = ?2");
/// assert_eq!(clause.next_parameter_index(), 3);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SetClause {
    columns: Vec<&'static str>,
    values: Vec<Value>,
}

impl SetClause {
    /// Add an assignment of `value` to `column`.
    ///
    /// `column` is interpolated into the SQL string, so it must be a trusted,
    /// static column name and never user input.
    pub fn set(&mut self, column: &'static str, value: Value) {
        self.columns.push(column);
        self.values.push(value);
    }

    /// The comma separated assignments, e.g. `amount = ?1, date = ?2`.
    pub fn assignments(&self) -> String {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ?{}", i + 1))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The index of the first positional parameter after the assignments.
    pub fn next_parameter_index(&self) -> usize {
        self.values.len() + 1
    }

    /// Consume the clause and return the values to bind, in parameter order.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::types::Value;

    use super::SetClause;

    #[test]
    fn empty_clause() {
        let clause = SetClause::default();

        assert_eq!(clause.assignments(), "");
        assert_eq!(clause.next_parameter_index(), 1);
    }

    #[test]
    fn numbers_parameters_in_insertion_order() {
        let mut clause = SetClause::default();
        clause.set("amount", Value::Text("1.00".to_owned()));
        clause.set("date", Value::Text("2024-03-15".to_owned()));

        assert_eq!(clause.assignments(), "amount = ?1, date = ?2");
        assert_eq!(clause.next_parameter_index(), 3);
        assert_eq!(
            clause.into_values(),
            vec![
                Value::Text("1.00".to_owned()),
                Value::Text("2024-03-15".to_owned())
            ]
        );
    }
}
