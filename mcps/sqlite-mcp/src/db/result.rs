//! Outcome of one executed statement

use serde::Serialize;

use super::value::Row;

/// Columns and rows of a statement, or the affected-row count of a mutation
///
/// `columns` is empty for statements without a result set; `row_count` then
/// carries the engine's change count and `rows` stays empty. For tabular
/// statements `row_count == rows.len()` and `truncated` says whether more
/// rows existed past the cap.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub row_count: usize,
    pub truncated: bool,
}

impl QueryResult {
    pub fn tabular(columns: Vec<String>, rows: Vec<Row>, truncated: bool) -> Self {
        Self {
            row_count: rows.len(),
            columns,
            rows,
            truncated,
        }
    }

    pub fn mutation(affected: usize) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            row_count: affected,
            truncated: false,
        }
    }

    /// Whether the statement described a result set
    pub fn is_tabular(&self) -> bool {
        !self.columns.is_empty()
    }

    /// JSON payload with `columns`, `rows`, `row_count` and `truncated`
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "columns": self.columns,
            "rows": self.rows,
            "row_count": self.row_count,
            "truncated": self.truncated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqlValue;

    #[test]
    fn test_tabular_counts_rows() {
        let rows = vec![
            Row::from_pairs([("id", SqlValue::Integer(1))]),
            Row::from_pairs([("id", SqlValue::Integer(2))]),
        ];
        let result = QueryResult::tabular(vec!["id".into()], rows, true);
        assert!(result.is_tabular());
        assert_eq!(result.row_count, 2);
        assert!(result.truncated);
    }

    #[test]
    fn test_mutation_has_no_columns() {
        let result = QueryResult::mutation(3);
        assert!(!result.is_tabular());
        assert!(result.rows.is_empty());
        assert_eq!(result.row_count, 3);
    }

    #[test]
    fn test_payload_shape() {
        let rows = vec![Row::from_pairs([
            ("id", SqlValue::Integer(7)),
            ("name", SqlValue::from("x")),
        ])];
        let payload = QueryResult::tabular(vec!["id".into(), "name".into()], rows, false).to_payload();
        assert_eq!(payload["columns"], serde_json::json!(["id", "name"]));
        assert_eq!(payload["rows"][0]["name"], "x");
        assert_eq!(payload["row_count"], 1);
        assert_eq!(payload["truncated"], false);
    }
}
