//! End-to-end queries against the students table

use proptest::prelude::*;
use sandql_core::{Catalog, ErrorKind, ResultSet, Table, Value};
use sandql_query::{execute, ExecutorConfig, QueryExecutor};

fn students() -> Table {
    serde_json::from_str(include_str!("fixtures/students.json")).unwrap()
}

fn ids(result: &ResultSet) -> Vec<i64> {
    result
        .column_values("id")
        .unwrap()
        .into_iter()
        .filter_map(Value::as_integer)
        .collect()
}

#[test]
fn test_select_all_is_the_table() {
    let table = students();
    let result = execute("SELECT * FROM students;", &table).unwrap();

    assert_eq!(result.column_names(), vec!["id", "name", "age", "grade", "major"]);
    assert_eq!(result.row_count(), 15);
    assert_eq!(ids(&result), (1..=15).collect::<Vec<_>>());
    assert_eq!(result.into_table("students").unwrap(), table);
}

#[test]
fn test_select_columns() {
    let result = execute("SELECT name, age FROM students;", &students()).unwrap();
    assert_eq!(result.column_names(), vec!["name", "age"]);
    assert_eq!(
        result.record(0).unwrap(),
        vec![("name", &Value::from("Alice Johnson")), ("age", &Value::from(20))]
    );
}

#[test]
fn test_where_numeric() {
    let result = execute("SELECT * FROM students WHERE age > 21;", &students()).unwrap();
    assert_eq!(ids(&result), vec![2, 5, 7, 9, 11, 13, 15]);
}

#[test]
fn test_where_text() {
    let result = execute(
        "SELECT * FROM students WHERE major = 'Computer Science';",
        &students(),
    )
    .unwrap();
    assert_eq!(ids(&result), vec![1, 4, 10]);
}

#[test]
fn test_and_matches_grade_exactly() {
    let result = execute(
        "SELECT * FROM students WHERE age > 20 AND grade = 'A';",
        &students(),
    )
    .unwrap();
    // Diana (21, A+) is excluded
    assert_eq!(ids(&result), vec![10, 13]);
}

#[test]
fn test_or_condition() {
    let result = execute(
        "SELECT * FROM students WHERE major = 'Physics' OR major = 'Mathematics';",
        &students(),
    )
    .unwrap();
    assert_eq!(ids(&result), vec![2, 3, 8, 9, 14, 15]);
}

#[test]
fn test_order_by_age_desc() {
    let result = execute("SELECT name, age FROM students ORDER BY age DESC;", &students()).unwrap();

    assert_eq!(result.column_names(), vec!["name", "age"]);
    assert_eq!(result.get(0, "name"), Some(&Value::from("Kevin Martinez")));
    assert_eq!(result.get(1, "name"), Some(&Value::from("George Miller")));
    // Edward and Michael are both 23 and keep table order
    assert_eq!(result.get(2, "name"), Some(&Value::from("Edward Wilson")));
    assert_eq!(result.get(3, "name"), Some(&Value::from("Michael Taylor")));
}

#[test]
fn test_order_by_age_asc_is_stable() {
    let result = execute("SELECT * FROM students ORDER BY age ASC;", &students()).unwrap();
    assert_eq!(&ids(&result)[..3], &[3, 8, 14]);
}

#[test]
fn test_count_star() {
    let result = execute("SELECT COUNT(*) FROM students;", &students()).unwrap();
    assert_eq!(result.column_names(), vec!["COUNT(*)"]);
    assert_eq!(result.rows(), &[vec![Value::Integer(15)]]);

    let filtered = execute("select count( * ) from students where grade = 'A+'", &students()).unwrap();
    assert_eq!(filtered.get(0, "COUNT(*)"), Some(&Value::Integer(3)));
}

#[test]
fn test_like_with_order() {
    let result = execute(
        "SELECT * FROM students WHERE name LIKE 'A%' ORDER BY grade;",
        &students(),
    )
    .unwrap();
    assert_eq!(ids(&result), vec![1]);

    let suffix = execute(
        "SELECT name FROM students WHERE name LIKE '%son' ORDER BY name DESC",
        &students(),
    )
    .unwrap();
    assert_eq!(
        suffix.column_values("name").unwrap(),
        vec![
            &Value::from("Oliver Jackson"),
            &Value::from("Lisa Anderson"),
            &Value::from("Ian Thompson"),
            &Value::from("Edward Wilson"),
            &Value::from("Alice Johnson"),
        ]
    );
}

#[test]
fn test_sort_by_unprojected_column() {
    let result = execute("SELECT name FROM students WHERE age = 19 ORDER BY id DESC", &students()).unwrap();
    assert_eq!(
        result.column_values("name").unwrap(),
        vec![
            &Value::from("Nancy White"),
            &Value::from("Hannah Lee"),
            &Value::from("Charlie Brown"),
        ]
    );
}

#[test]
fn test_projection_round_trip() {
    let table = students();
    let projected = execute("SELECT name, age FROM students", &table).unwrap();
    let reloaded = projected.clone().into_table("students").unwrap();
    let again = execute("SELECT * FROM students", &reloaded).unwrap();
    assert_eq!(again, projected);
}

fn codes() -> Table {
    serde_json::from_str(
        r#"{
            "name": "codes",
            "columns": [
                {"name": "id", "type": "integer"},
                {"name": "code", "type": "text"},
                {"name": "owner", "type": "text"}
            ],
            "rows": [
                {"id": 1, "code": "007", "owner": "O'Brien"},
                {"id": 2, "code": "2.50", "owner": "Obi"},
                {"id": 3, "code": "7", "owner": "O''Neil"}
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn test_numeric_looking_text_column() {
    let table = codes();
    let matched = |query: &str| ids(&execute(query, &table).unwrap());

    assert_eq!(matched("SELECT id FROM codes WHERE code = '007'"), vec![1]);
    assert_eq!(matched("SELECT id FROM codes WHERE code = '2.50'"), vec![2]);
    assert_eq!(matched("SELECT id FROM codes WHERE code = '7'"), vec![3]);
    assert!(matched("SELECT id FROM codes WHERE code = 2.5").is_empty());
}

#[test]
fn test_doubled_quote_in_literal() {
    let table = codes();
    let matched = |query: &str| ids(&execute(query, &table).unwrap());

    assert_eq!(matched("SELECT id FROM codes WHERE owner = 'O''Brien'"), vec![1]);
    assert_eq!(matched("SELECT id FROM codes WHERE owner = 'O''''Neil'"), vec![3]);
    assert_eq!(matched("SELECT id FROM codes WHERE owner LIKE 'O''%'"), vec![1, 3]);

    let err = execute(r"SELECT id FROM codes WHERE owner = 'O\'Brien'", &table).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn test_error_kinds() {
    let table = students();
    let cases = [
        ("SELECT FROM students", ErrorKind::Syntax),
        ("SELECT * students", ErrorKind::Syntax),
        ("SELECT * FROM students WHERE", ErrorKind::Syntax),
        ("SELECT * FROM students WHERE age >", ErrorKind::Syntax),
        ("SELECT * FROM teachers", ErrorKind::Semantic),
        ("SELECT gpa FROM students", ErrorKind::Semantic),
        ("SELECT name, name FROM students", ErrorKind::Semantic),
        ("SELECT * FROM students ORDER BY gpa", ErrorKind::Semantic),
        ("SELECT * FROM students WHERE gpa > 3", ErrorKind::Evaluation),
        ("SELECT * FROM students WHERE id LIKE '1%'", ErrorKind::Evaluation),
        ("DELETE FROM students WHERE id = 1;", ErrorKind::UnsupportedStatement),
        ("DROP TABLE students", ErrorKind::UnsupportedStatement),
        ("SELECT * FROM students WHERE age > 20 AND grade = 'A' OR age < 19", ErrorKind::UnsupportedStatement),
        ("SELECT * FROM students ORDER BY age, name", ErrorKind::UnsupportedStatement),
        ("SELECT name, COUNT(*) FROM students", ErrorKind::UnsupportedStatement),
        ("SELECT * FROM students LIMIT 3", ErrorKind::UnsupportedStatement),
    ];
    for (query, kind) in cases {
        let err = execute(query, &table).unwrap_err();
        assert_eq!(err.kind(), kind, "{}: {}", query, err);
        assert!(err.is_user_error());
    }
    assert_eq!(table, students());
}

#[test]
fn test_catalog_and_config() {
    let catalog = Catalog::with(students());
    let executor = QueryExecutor::new(ExecutorConfig::default().with_max_query_length(30));

    assert!(executor.execute_in("SELECT * FROM students", &catalog).is_ok());
    let err = executor
        .execute_in("SELECT name FROM students WHERE age > 21", &catalog)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn test_result_json_shape() {
    let result = execute("SELECT name, age FROM students WHERE id = 1", &students()).unwrap();
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        serde_json::json!({
            "columns": ["name", "age"],
            "rows": [["Alice Johnson", 20]],
            "rowCount": 1
        })
    );
}

proptest! {
    #[test]
    fn prop_filter_is_ordered_subsequence(k in 15i64..30) {
        let table = students();
        let result = execute(&format!("SELECT * FROM students WHERE age > {}", k), &table).unwrap();
        let expected: Vec<i64> = table
            .rows()
            .iter()
            .filter(|r| r.get("age").and_then(Value::as_integer).is_some_and(|age| age > k))
            .filter_map(|r| r.get("id").and_then(Value::as_integer))
            .collect();
        prop_assert_eq!(ids(&result), expected);
    }

    #[test]
    fn prop_count_matches_filter(k in 15i64..30, op in prop::sample::select(vec!["<", "<=", "=", "!=", ">=", ">"])) {
        let table = students();
        let rows = execute(&format!("SELECT * FROM students WHERE age {} {}", op, k), &table).unwrap();
        let count = execute(&format!("SELECT COUNT(*) FROM students WHERE age {} {}", op, k), &table).unwrap();
        prop_assert_eq!(count.rows()[0][0].clone(), Value::Integer(rows.row_count() as i64));
    }
}
