//! Line-oriented interactive shell

use crate::error::SandboxError;
use crate::sandbox::Sandbox;
use std::io::{BufRead, Write};

const HELP: &str = "\
Enter a SELECT query on one line, or one of:
  .tables          list tables
  .schema [table]  show columns
  .help            show this message
  .quit            leave the shell";

/// What the shell should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    /// Print this text and keep reading
    Print(String),
    /// Nothing to print
    Continue,
    /// Stop reading
    Quit,
}

/// Handle one input line
pub fn handle_line(sandbox: &Sandbox, line: &str) -> ReplAction {
    let line = line.trim();
    if line.is_empty() {
        return ReplAction::Continue;
    }

    if let Some(command) = line.strip_prefix('.') {
        let mut parts = command.split_whitespace();
        return match (parts.next(), parts.next()) {
            (Some("quit" | "exit"), _) => ReplAction::Quit,
            (Some("help"), _) => ReplAction::Print(HELP.to_string()),
            (Some("tables"), _) => ReplAction::Print(sandbox.describe_tables()),
            (Some("schema"), table) => match sandbox.describe_schema(table) {
                Ok(text) => ReplAction::Print(text.trim_end().to_string()),
                Err(err) => ReplAction::Print(format!("Error: {}", err)),
            },
            _ => ReplAction::Print(format!("Unknown command: {} (try .help)", line)),
        };
    }

    let rendered = sandbox
        .query(line)
        .map_err(SandboxError::from)
        .and_then(|outcome| sandbox.render(&outcome.result));
    match rendered {
        Ok(text) => ReplAction::Print(text),
        Err(err) => ReplAction::Print(format!("Error: {}", err)),
    }
}

/// Read lines from `input` until `.quit` or end of input
pub fn run<R: BufRead, W: Write>(sandbox: &Sandbox, input: R, mut output: W) -> std::io::Result<()> {
    write!(output, "sandql> ")?;
    output.flush()?;
    for line in input.lines() {
        match handle_line(sandbox, &line?) {
            ReplAction::Quit => return Ok(()),
            ReplAction::Print(text) => writeln!(output, "{}", text)?,
            ReplAction::Continue => {}
        }
        write!(output, "sandql> ")?;
        output.flush()?;
    }
    writeln!(output)
}
