//! Graded practice tasks
//!
//! A learner's answer is graded by running it and the task's reference
//! query against the same tables and comparing the result sets. Matching
//! the reference text is reported separately and never required.

use crate::error::{Result, SandboxError};
use sandql_core::{Error, TableProvider};
use sandql_query::QueryExecutor;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// How hard a task is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        };
        f.write_str(name)
    }
}

/// One practice exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeTask {
    pub id: u32,
    pub title: &'static str,
    pub difficulty: Difficulty,
    pub description: &'static str,
    pub hint: &'static str,
    pub expected_query: &'static str,
    pub explanation: &'static str,
}

/// Outcome of grading an answer
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Same columns and rows, in the same order
    Correct,
    /// The answer ran but produced a different result
    Mismatch {
        expected_rows: usize,
        actual_rows: usize,
    },
    /// The answer failed to run
    Failed(Error),
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => f.write_str("Correct! Your query returns the expected result."),
            Verdict::Mismatch {
                expected_rows,
                actual_rows,
            } => write!(
                f,
                "Not quite. Expected {} row(s), your query returned {} row(s) or different data.",
                expected_rows, actual_rows
            ),
            Verdict::Failed(err) => write!(f, "Error: {}", err),
        }
    }
}

impl PracticeTask {
    /// Grade an answer against the tables in `tables`.
    ///
    /// Returns an error only if the reference query itself cannot run,
    /// which means `tables` is not the data this task was written for.
    pub fn check(
        &self,
        answer: &str,
        tables: &dyn TableProvider,
        executor: &QueryExecutor,
    ) -> Result<Verdict> {
        let expected = executor.execute_in(self.expected_query, tables)?;

        let verdict = match executor.execute_in(answer, tables) {
            Ok(actual) if actual == expected => Verdict::Correct,
            Ok(actual) => Verdict::Mismatch {
                expected_rows: expected.row_count(),
                actual_rows: actual.row_count(),
            },
            Err(err) => Verdict::Failed(err),
        };
        debug!(task = self.id, correct = verdict.is_correct(), "answer checked");
        Ok(verdict)
    }

    /// Whether the answer is textually the reference query, ignoring case,
    /// spacing and a trailing semicolon
    pub fn matches_text(&self, answer: &str) -> bool {
        normalize_query(answer) == normalize_query(self.expected_query)
    }
}

/// Lowercase, collapse whitespace, trim and drop a trailing `;`
pub fn normalize_query(query: &str) -> String {
    let collapsed = query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    match collapsed.strip_suffix(';') {
        Some(stripped) => stripped.trim_end().to_string(),
        None => collapsed,
    }
}

/// All practice tasks in order
pub fn practice_tasks() -> &'static [PracticeTask] {
    &TASKS
}

/// Look up a task by id
pub fn task(id: u32) -> Result<&'static PracticeTask> {
    TASKS
        .iter()
        .find(|t| t.id == id)
        .ok_or(SandboxError::UnknownTask(id))
}

static TASKS: [PracticeTask; 10] = [
    PracticeTask {
        id: 1,
        title: "Select All Data",
        difficulty: Difficulty::Beginner,
        description: "Write a SQL query to select all columns and all rows from the 'students' table.",
        hint: "Use the * symbol to select all columns. The basic syntax is: SELECT * FROM table_name;",
        expected_query: "SELECT * FROM students;",
        explanation: "The * symbol is a wildcard that selects all columns from the specified table.",
    },
    PracticeTask {
        id: 2,
        title: "Select Specific Columns",
        difficulty: Difficulty::Beginner,
        description: "Select only the 'name' and 'age' columns from the students table.",
        hint: "List the column names separated by commas after SELECT.",
        expected_query: "SELECT name, age FROM students;",
        explanation: "You can specify which columns to retrieve by listing them after SELECT.",
    },
    PracticeTask {
        id: 3,
        title: "Filter with WHERE",
        difficulty: Difficulty::Beginner,
        description: "Select all students who are older than 21 years.",
        hint: "Use the WHERE clause with the > operator to filter results.",
        expected_query: "SELECT * FROM students WHERE age > 21;",
        explanation: "The WHERE clause filters rows based on specified conditions.",
    },
    PracticeTask {
        id: 4,
        title: "Filter by Text",
        difficulty: Difficulty::Beginner,
        description: "Select all students who are majoring in 'Computer Science'.",
        hint: "Use quotes around text values when comparing strings.",
        expected_query: "SELECT * FROM students WHERE major = 'Computer Science';",
        explanation: "String values must be enclosed in single or double quotes in SQL.",
    },
    PracticeTask {
        id: 5,
        title: "Sort Results",
        difficulty: Difficulty::Beginner,
        description: "Select all students and sort them by age in ascending order.",
        hint: "Use ORDER BY column_name ASC to sort in ascending order.",
        expected_query: "SELECT * FROM students ORDER BY age ASC;",
        explanation: "ORDER BY sorts the result set. ASC is ascending (default), DESC is descending.",
    },
    PracticeTask {
        id: 6,
        title: "Sort Descending",
        difficulty: Difficulty::Beginner,
        description: "Select student names and ages, sorted by age in descending order.",
        hint: "Use ORDER BY column_name DESC for descending order.",
        expected_query: "SELECT name, age FROM students ORDER BY age DESC;",
        explanation: "DESC keyword sorts results in descending order (highest to lowest).",
    },
    PracticeTask {
        id: 7,
        title: "Multiple Conditions",
        difficulty: Difficulty::Intermediate,
        description: "Select students who are older than 20 AND have grade 'A'.",
        hint: "Use AND to combine multiple conditions in WHERE clause.",
        expected_query: "SELECT * FROM students WHERE age > 20 AND grade = 'A';",
        explanation: "AND operator requires both conditions to be true for a row to be selected.",
    },
    PracticeTask {
        id: 8,
        title: "OR Condition",
        difficulty: Difficulty::Intermediate,
        description: "Select students who are either majoring in 'Physics' OR 'Mathematics'.",
        hint: "Use OR to select rows that match either condition.",
        expected_query: "SELECT * FROM students WHERE major = 'Physics' OR major = 'Mathematics';",
        explanation: "OR operator selects rows where at least one condition is true.",
    },
    PracticeTask {
        id: 9,
        title: "Count Records",
        difficulty: Difficulty::Intermediate,
        description: "Count the total number of students in the table.",
        hint: "Use COUNT(*) to count all rows.",
        expected_query: "SELECT COUNT(*) FROM students;",
        explanation: "COUNT(*) returns the number of rows in the result set.",
    },
    PracticeTask {
        id: 10,
        title: "Advanced Filtering",
        difficulty: Difficulty::Advanced,
        description: "Select students whose names start with 'A' and sort by grade.",
        hint: "Use LIKE with % wildcard for pattern matching. A% means starts with A.",
        expected_query: "SELECT * FROM students WHERE name LIKE 'A%' ORDER BY grade;",
        explanation: "LIKE operator with % wildcard allows pattern matching in text fields.",
    },
];
