//! Command-line grammar of the REPL.
//!
//! One line is one command: a verb followed by free text or a card number.
//! Parsing is purely syntactic; resolving card numbers and category names
//! against the current state happens in [`crate::repl`].

use std::str::FromStr;
use thiserror::Error;

use promptbank_core::SortOption;

use crate::controller::FormField;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}. Type 'help' for a list of commands")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Not a card number: {0}")]
    InvalidNumber(String),

    #[error("Unknown sort order: {0} (use newest, oldest, az or default)")]
    InvalidSort(String),

    #[error("No card {0} in the current list")]
    NoSuchCard(usize),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Open a prompt first or give a card number")]
    NoSelection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Empty text clears the search.
    Search(String),
    /// `None` selects every category.
    Category(Option<String>),
    Sort(Option<SortOption>),
    Open(usize),
    Close,
    /// Copies the given card, or the open detail view.
    Copy(Option<usize>),
    /// Taps on the logo, one per `logo` word on the line.
    Logo(usize),
    Login(String),
    Logout,
    Add,
    Edit(Option<usize>),
    /// `None` for the body starts multi-line capture.
    Set(FormField, Option<String>),
    Submit,
    Cancel,
    Delete(Option<usize>),
    Yes,
    No,
    Help,
    Quit,
}

pub const HELP: &str = "\
Browsing:
  search <text>        filter by title or prompt text (no text clears)
  category [name]      show one category (no name shows all)
  sort newest|oldest|az|default
  open <n>             show card n in full
  close                close the current view
  copy [n]             copy a prompt to the clipboard
Admin:
  logo logo logo       tap the logo; one tap per word
  login <password>     sign in once the login prompt is open
  logout
  add                  new prompt
  edit [n]             edit card n or the open prompt
  set title <text>
  set category <text>
  set body [text]      without text, type lines and end with a single '.'
  submit | cancel
  delete [n]           asks for confirmation: yes | no
Other:
  help | quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "search" | "s" => Ok(Self::Search(rest.to_string())),
            "category" | "cat" => Ok(Self::Category(non_empty(rest))),
            "sort" => parse_sort(rest).map(Self::Sort),
            "open" | "o" => Ok(Self::Open(
                parse_number(rest)?.ok_or(CommandError::Usage("open <n>"))?,
            )),
            "close" => Ok(Self::Close),
            "copy" | "c" => parse_number(rest).map(Self::Copy),
            "logo" => parse_logo(rest).map(Self::Logo),
            "login" => Ok(Self::Login(rest.to_string())),
            "logout" => Ok(Self::Logout),
            "add" | "new" => Ok(Self::Add),
            "edit" => parse_number(rest).map(Self::Edit),
            "set" => parse_set(rest),
            "submit" | "save" => Ok(Self::Submit),
            "cancel" => Ok(Self::Cancel),
            "delete" | "rm" => parse_number(rest).map(Self::Delete),
            "yes" | "y" => Ok(Self::Yes),
            "no" | "n" => Ok(Self::No),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// `logo` alone is one tap; `logo logo logo` is a burst of three.
fn parse_logo(rest: &str) -> Result<usize, CommandError> {
    let mut taps = 1;
    for word in rest.split_whitespace() {
        if !word.eq_ignore_ascii_case("logo") {
            return Err(CommandError::Usage("logo [logo ...]"));
        }
        taps += 1;
    }
    Ok(taps)
}

fn parse_number(text: &str) -> Result<Option<usize>, CommandError> {
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(CommandError::InvalidNumber(text.to_string())),
    }
}

fn parse_sort(text: &str) -> Result<Option<SortOption>, CommandError> {
    match text.to_lowercase().as_str() {
        "" | "default" | "none" => Ok(None),
        other => other
            .parse::<SortOption>()
            .map(Some)
            .map_err(|_| CommandError::InvalidSort(text.to_string())),
    }
}

fn parse_set(text: &str) -> Result<Command, CommandError> {
    const USAGE: &str = "set title|category|body <text>";
    let (field, value) = match text.split_once(char::is_whitespace) {
        Some((field, value)) => (field, value.trim()),
        None => (text, ""),
    };
    let field = match field.to_lowercase().as_str() {
        "title" => FormField::Title,
        "category" => FormField::Category,
        "body" | "prompt" => FormField::Body,
        _ => return Err(CommandError::Usage(USAGE)),
    };
    match (field, value.is_empty()) {
        (FormField::Body, true) => Ok(Command::Set(field, None)),
        (_, true) => Err(CommandError::Usage(USAGE)),
        _ => Ok(Command::Set(field, Some(value.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, CommandError> {
        line.parse()
    }

    #[test]
    fn test_search_keeps_inner_spaces() {
        assert_eq!(
            parse("search  bug fixer "),
            Ok(Command::Search("bug fixer".to_string()))
        );
        assert_eq!(parse("search"), Ok(Command::Search(String::new())));
    }

    #[test]
    fn test_card_numbers() {
        assert_eq!(parse("open 2"), Ok(Command::Open(2)));
        assert_eq!(parse("copy"), Ok(Command::Copy(None)));
        assert_eq!(parse("delete 1"), Ok(Command::Delete(Some(1))));
        assert_eq!(
            parse("open zero"),
            Err(CommandError::InvalidNumber("zero".to_string()))
        );
        assert_eq!(parse("open 0"), Err(CommandError::InvalidNumber("0".to_string())));
        assert!(matches!(parse("open"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_sort_options() {
        assert_eq!(parse("sort AZ"), Ok(Command::Sort(Some(SortOption::Az))));
        assert_eq!(parse("sort default"), Ok(Command::Sort(None)));
        assert_eq!(
            parse("sort random"),
            Err(CommandError::InvalidSort("random".to_string()))
        );
    }

    #[test]
    fn test_set_fields() {
        assert_eq!(
            parse("set title SEO Writer"),
            Ok(Command::Set(FormField::Title, Some("SEO Writer".to_string())))
        );
        assert_eq!(parse("set body"), Ok(Command::Set(FormField::Body, None)));
        assert!(matches!(parse("set title"), Err(CommandError::Usage(_))));
        assert!(matches!(parse("set colour red"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_logo_counts_words() {
        assert_eq!(parse("logo"), Ok(Command::Logo(1)));
        assert_eq!(parse("logo logo  LOGO"), Ok(Command::Logo(3)));
        assert!(matches!(parse("logo please"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_unknown_verb() {
        assert_eq!(
            parse("frobnicate"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
    }
}
