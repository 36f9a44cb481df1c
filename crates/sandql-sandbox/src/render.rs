//! Result set rendering

use sandql_core::{ResultSet, Table};

/// Shown in place of a table when a query matches no rows
pub const NO_RESULTS: &str = "No results found.";

/// Draw a result set as an aligned text table
pub fn render_table(result: &ResultSet) -> String {
    if result.is_empty() {
        return NO_RESULTS.to_string();
    }

    let headers = result.column_names();
    let cells: Vec<Vec<String>> = result
        .rows()
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out.push_str(&format!(
        "({} row{})",
        result.row_count(),
        if result.row_count() == 1 { "" } else { "s" }
    ));
    out
}

fn push_line<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell.as_ref(), *width))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.chars().count());
    format!("{}{}", cell, " ".repeat(fill))
}

/// Serialize a result set as pretty JSON
pub fn render_json(result: &ResultSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Describe a table's columns, one per line
pub fn render_schema(table: &Table) -> String {
    let mut out = format!("{} ({} rows)\n", table.name(), table.len());
    for column in table.schema().columns() {
        out.push_str(&format!("  {} {}\n", column.name, column.column_type));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandql_core::{Column, Schema, Value};

    fn sample() -> ResultSet {
        ResultSet::new(
            vec![Column::text("name"), Column::integer("age")],
            vec![
                vec![Value::from("Alice Johnson"), Value::from(20)],
                vec![Value::from("Bob"), Value::from(22)],
            ],
        )
    }

    #[test]
    fn test_render_table() {
        let text = render_table(&sample());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "name          | age");
        assert_eq!(lines[1], "------------- | ---");
        assert_eq!(lines[2], "Alice Johnson | 20");
        assert_eq!(lines[3], "Bob           | 22");
        assert_eq!(lines[4], "(2 rows)");
    }

    #[test]
    fn test_render_empty() {
        let empty = ResultSet::new(vec![Column::text("name")], Vec::new());
        assert_eq!(render_table(&empty), NO_RESULTS);
    }

    #[test]
    fn test_render_single_row() {
        let count = ResultSet::new(vec![Column::integer("COUNT(*)")], vec![vec![Value::from(15)]]);
        assert!(render_table(&count).ends_with("(1 row)"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rowCount"], 2);
        assert_eq!(value["columns"][1], "age");
        assert_eq!(value["rows"][0][0], "Alice Johnson");
    }

    #[test]
    fn test_render_schema() {
        let table = Table::new(
            "pets",
            Schema::new(vec![Column::integer("id"), Column::text("kind")]).unwrap(),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(render_schema(&table), "pets (0 rows)\n  id integer\n  kind text\n");
    }
}
