//! Parsing of session commands typed at the prompt.
//!
//! Accepts both the numbered menu (`1`..`4`) and word commands:
//!
//! ```text
//! insert Hello        delete 3        replace 2 lo
//! undo                redo            history [json]
//! exit | quit
//! ```

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Append text; `None` means the text follows on the next line
    Insert(Option<String>),
    /// Remove the last `n` chars
    Delete(usize),
    /// Replace the last `n` chars with text
    Replace(usize, String),
    Undo,
    Redo,
    /// Print the log, optionally as JSON
    History { json: bool },
    Exit,
    /// Blank line
    Empty,
}

/// Errors in a single line of input. None of them end the session.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("{0} needs a count")]
    MissingCount(&'static str),

    #[error("Invalid count: {0}")]
    InvalidCount(String),
}

/// Parses one line of input.
///
/// Insert and replace text is taken verbatim after the separating space,
/// so leading spaces in `insert  Wukong!` are kept.
pub fn parse_line(line: &str) -> Result<Input, InputError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(Input::Empty);
    }

    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, Some(rest)),
        None => (trimmed, None),
    };

    match word.to_lowercase().as_str() {
        "1" | "insert" | "i" => Ok(Input::Insert(rest.map(str::to_string))),
        "2" | "undo" | "u" => Ok(Input::Undo),
        "3" | "redo" | "r" => Ok(Input::Redo),
        "4" | "exit" | "quit" | "q" => Ok(Input::Exit),
        "delete" | "d" => Ok(Input::Delete(parse_count("delete", rest)?)),
        "replace" => {
            let rest = rest.ok_or(InputError::MissingCount("replace"))?;
            let (count, text) = rest.split_once(' ').unwrap_or((rest, ""));
            Ok(Input::Replace(parse_count("replace", Some(count))?, text.to_string()))
        }
        "history" | "h" => Ok(Input::History {
            json: rest.is_some_and(|arg| arg.trim() == "json"),
        }),
        other => Err(InputError::UnknownCommand(other.to_string())),
    }
}

fn parse_count(command: &'static str, arg: Option<&str>) -> Result<usize, InputError> {
    let arg = arg
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .ok_or(InputError::MissingCount(command))?;
    arg.parse()
        .map_err(|_| InputError::InvalidCount(arg.to_string()))
}
