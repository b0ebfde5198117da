//! Interactive mode: type lines, see them evaluated against the whole sheet.
//!
//! Plain input is appended as a new line. Input starting with `:` is a command
//! that edits or inspects the sheet; line numbers are 1-based positions.

use anyhow::Result;
use calcsheet_core::Document;
use calcsheet_engine::builtins::MATH_BUILTINS;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

use crate::output::render_listing;

#[derive(Debug, PartialEq)]
pub enum Command {
    Append(String),
    List,
    Edit(usize, String),
    Insert(usize, String),
    Delete(usize),
    Clear,
    Functions(PathBuf),
    Reload,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: :{0}")]
    Unknown(String),

    #[error(":{0} requires a line number")]
    MissingLineNumber(&'static str),

    #[error("Invalid line number: {0}")]
    InvalidLineNumber(String),

    #[error(":functions requires a file path")]
    MissingPath,
}

fn parse_line_number(name: &'static str, arg: Option<&str>) -> Result<usize, CommandError> {
    let raw = arg.ok_or(CommandError::MissingLineNumber(name))?;
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidLineNumber(raw.to_string())),
    }
}

/// Parse one line of interactive input.
pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let Some(rest) = input.trim_start().strip_prefix(':') else {
        return Ok(Command::Append(input.to_string()));
    };

    let rest = rest.trim();
    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim_start()),
        None => (rest, ""),
    };
    let (first, remainder) = match args.split_once(char::is_whitespace) {
        Some((first, remainder)) => (Some(first), remainder.trim_start().to_string()),
        None if args.is_empty() => (None, String::new()),
        None => (Some(args), String::new()),
    };

    match name {
        "l" | "list" => Ok(Command::List),
        "e" | "edit" => Ok(Command::Edit(parse_line_number("edit", first)?, remainder)),
        "i" | "insert" => Ok(Command::Insert(
            parse_line_number("insert", first)?,
            remainder,
        )),
        "d" | "delete" => Ok(Command::Delete(parse_line_number("delete", first)?)),
        "clear" => Ok(Command::Clear),
        "f" | "functions" => {
            if args.is_empty() {
                Err(CommandError::MissingPath)
            } else {
                Ok(Command::Functions(PathBuf::from(args)))
            }
        }
        "reload" => Ok(Command::Reload),
        "h" | "help" => Ok(Command::Help),
        "q" | "quit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn help_text() -> String {
    let mut text = String::from(
        "Commands:\n\
         \x20 <text>              append a line\n\
         \x20 :list               show all lines with results\n\
         \x20 :edit N <text>      replace line N\n\
         \x20 :insert N <text>    insert a line after line N\n\
         \x20 :delete N           delete line N\n\
         \x20 :clear              start an empty sheet\n\
         \x20 :functions <file>   load custom Rhai functions\n\
         \x20 :reload             reload custom functions\n\
         \x20 :quit               exit\n\
         \nFunctions:\n",
    );
    for builtin in MATH_BUILTINS {
        text.push_str(&format!("  {:<8} {}\n", builtin.name, builtin.description));
    }
    text.push_str("\nPercentages: 20% of 50, 80 + 15%, 80 - 15%, 25% off 80\n");
    text
}

fn line_id_at(doc: &Document, n: usize) -> Result<u64> {
    doc.lines()
        .get(n - 1)
        .map(|line| line.id)
        .ok_or_else(|| anyhow::anyhow!("No line {} (sheet has {} lines)", n, doc.len()))
}

/// Apply one command. Returns the text to print, or `None` to quit.
pub fn apply(doc: &mut Document, command: Command) -> Result<Option<String>> {
    let output = match command {
        Command::Append(text) => {
            // A fresh sheet starts with one empty line; fill it instead of appending.
            let id = match doc.lines() {
                [only] if only.text.is_empty() => {
                    let id = only.id;
                    doc.set_text(id, &text)?;
                    id
                }
                _ => doc.push_line(&text),
            };
            doc.result(id).map(|r| r.to_string()).unwrap_or_default()
        }
        Command::List => render_listing(doc).trim_end().to_string(),
        Command::Edit(n, text) => {
            let id = line_id_at(doc, n)?;
            doc.set_text(id, &text)?;
            render_listing(doc).trim_end().to_string()
        }
        Command::Insert(n, text) => {
            let id = line_id_at(doc, n)?;
            doc.insert_after(id, &text)?;
            render_listing(doc).trim_end().to_string()
        }
        Command::Delete(n) => {
            let id = line_id_at(doc, n)?;
            doc.remove(id)?;
            render_listing(doc).trim_end().to_string()
        }
        Command::Clear => {
            doc.replace_all(Vec::<String>::new());
            String::new()
        }
        Command::Functions(path) => {
            let loaded = doc.load_functions(&path)?;
            render_listing(doc).trim_end().to_string() + format!("\nLoaded {}", loaded.display()).as_str()
        }
        Command::Reload => {
            let count = doc.reload_functions()?;
            format!("Reloaded {} functions file(s)", count)
        }
        Command::Help => help_text(),
        Command::Quit => return Ok(None),
    };
    Ok(Some(output))
}

/// Run the interactive loop until `:quit` or end of input.
pub fn run<R: BufRead, W: Write>(doc: &mut Document, input: R, mut out: W) -> Result<()> {
    writeln!(out, "calcsheet - type :help for commands")?;
    for line in input.lines() {
        let line = line?;
        let result = parse_command(&line)
            .map_err(anyhow::Error::from)
            .and_then(|command| apply(doc, command));
        match result {
            Ok(Some(text)) if text.is_empty() => {}
            Ok(Some(text)) => writeln!(out, "{}", text)?,
            Ok(None) => break,
            Err(err) => writeln!(out, "Error: {}", err)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_text_appends() {
        assert_eq!(
            parse_command("x = 1"),
            Ok(Command::Append("x = 1".to_string()))
        );
    }

    #[test]
    fn parse_commands_with_arguments() {
        assert_eq!(
            parse_command(":edit 2 y = 3"),
            Ok(Command::Edit(2, "y = 3".to_string()))
        );
        assert_eq!(
            parse_command(":i 1 20% of 50"),
            Ok(Command::Insert(1, "20% of 50".to_string()))
        );
        assert_eq!(parse_command(":d 4"), Ok(Command::Delete(4)));
        assert_eq!(parse_command(":edit 2"), Ok(Command::Edit(2, String::new())));
        assert_eq!(
            parse_command(":functions my funcs.rhai"),
            Ok(Command::Functions(PathBuf::from("my funcs.rhai")))
        );
        assert_eq!(parse_command(" :q "), Ok(Command::Quit));
    }

    #[test]
    fn parse_command_errors() {
        assert_eq!(
            parse_command(":delete"),
            Err(CommandError::MissingLineNumber("delete"))
        );
        assert_eq!(
            parse_command(":delete 0"),
            Err(CommandError::InvalidLineNumber("0".to_string()))
        );
        assert_eq!(
            parse_command(":bogus"),
            Err(CommandError::Unknown("bogus".to_string()))
        );
        assert_eq!(parse_command(":functions"), Err(CommandError::MissingPath));
    }

    #[test]
    fn session_recalculates_whole_sheet() {
        let mut doc = Document::new();
        let input = "y = x + 1\nx = 5\n:insert 2 y = x + 1\n:delete 1\n:list\n:quit\nignored\n";
        let mut out = Vec::new();
        run(&mut doc, input.as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Invalid expression"));
        assert!(out.contains("y = 6"));
        assert_eq!(doc.result_strings(), vec!["x = 5", "y = 6"]);
    }

    #[test]
    fn session_reports_errors_and_continues() {
        let mut doc = Document::new();
        let input = "1 + 1\n:delete 9\n:delete 1\n2 * 3\n";
        let mut out = Vec::new();
        run(&mut doc, input.as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Error: No line 9"));
        assert!(out.contains("Error: Cannot remove the last line"));
        assert_eq!(doc.result_strings(), vec!["2", "6"]);
    }
}
