//! Line commands for interactive mode.

use doctor_directory_core::view::LOAD_FAILED_TEXT;
use doctor_directory_core::{
    suggest, ConsultationType, DirectoryStore, LoadState, QueryAction, SortKey,
};

pub const HELP: &str = "\
Commands:
  type <text>        update the search box and list suggestions
  pick <n>           apply suggestion n (1-based)
  search <text>      apply <text> as the search query
  toggle <specialty> select or deselect a specialty
  mode video|clinic|any
  sort fees|experience|none
  show               render the page
  url                print the location string
  help
  quit";

/// A parsed interactive command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Type(String),
    Pick(usize),
    Search(String),
    Toggle(String),
    Mode(ConsultationType),
    Sort(SortKey),
    Show,
    Url,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "type" => Ok(Command::Type(rest.to_string())),
            "pick" => rest
                .parse::<usize>()
                .ok()
                .filter(|&n| n >= 1)
                .map(Command::Pick)
                .ok_or_else(|| format!("pick expects a suggestion number, got {:?}", rest)),
            "search" => Ok(Command::Search(rest.to_string())),
            "toggle" if !rest.is_empty() => Ok(Command::Toggle(rest.to_string())),
            "toggle" => Err("toggle expects a specialty name".to_string()),
            "mode" => match rest {
                "video" => Ok(Command::Mode(ConsultationType::Video)),
                "clinic" => Ok(Command::Mode(ConsultationType::Clinic)),
                "any" | "" => Ok(Command::Mode(ConsultationType::Any)),
                other => Err(format!("unknown consultation mode {:?}", other)),
            },
            "sort" => match rest {
                "fees" => Ok(Command::Sort(SortKey::Fees)),
                "experience" => Ok(Command::Sort(SortKey::Experience)),
                "none" | "" => Ok(Command::Sort(SortKey::Unsorted)),
                other => Err(format!("unknown sort key {:?}", other)),
            },
            "show" => Ok(Command::Show),
            "url" => Ok(Command::Url),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command {:?}, try `help`", other)),
        }
    }
}

/// What the caller should print after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Page,
    Suggestions(Vec<String>),
    Location(String),
    Message(String),
    Quit,
}

/// Apply a command to the store.
pub fn execute(store: &mut DirectoryStore, command: Command) -> Outcome {
    match command {
        Command::Type(text) => {
            store.set_draft(text);
            Outcome::Suggestions(store.suggestions().to_vec())
        }
        Command::Pick(n) => match store.select_suggestion(n - 1) {
            Some(_) => Outcome::Page,
            None => Outcome::Message(format!("no suggestion {}", n)),
        },
        Command::Search(text) => {
            store.set_draft(text);
            store.submit_draft();
            Outcome::Page
        }
        Command::Toggle(tag) => {
            store.dispatch(QueryAction::ToggleSpecialty(tag));
            Outcome::Page
        }
        Command::Mode(mode) => {
            store.dispatch(QueryAction::SetConsultation(mode));
            Outcome::Page
        }
        Command::Sort(key) => {
            store.dispatch(QueryAction::SetSort(key));
            Outcome::Page
        }
        Command::Show => Outcome::Page,
        Command::Url => Outcome::Location(store.location().to_string()),
        Command::Help => Outcome::Message(HELP.to_string()),
        Command::Quit => Outcome::Quit,
    }
}

/// Lines printed by `doctor-directory suggest`. A failed load prints the
/// failure text rather than an empty list.
pub fn suggestion_lines(store: &DirectoryStore, partial: &str) -> Vec<String> {
    if let LoadState::Failed(reason) = store.load_state() {
        tracing::warn!(%reason, "No suggestions: doctors failed to load");
        return vec![LOAD_FAILED_TEXT.to_string()];
    }
    suggest(store.records(), partial)
}
