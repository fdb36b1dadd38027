use core::str::FromStr;

use thiserror::Error;

/// One operator instruction, parsed from a line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Name(String),
    Add { item: String, quantity: String },
    Show,
    Total,
    Invoice,
    Clear,
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command {0:?} (type `help`)")]
    UnknownCommand(String),

    #[error("usage: add <item name or number> <quantity>")]
    AddUsage,
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => Ok(Command::List),
            "name" => Ok(Command::Name(rest.to_string())),
            "add" => {
                // The quantity is the last word so item names may contain spaces.
                let (item, quantity) = rest.rsplit_once(char::is_whitespace).ok_or(ParseError::AddUsage)?;
                let item = item.trim();
                if item.is_empty() {
                    return Err(ParseError::AddUsage);
                }
                Ok(Command::Add {
                    item: item.to_string(),
                    quantity: quantity.to_string(),
                })
            }
            "show" => Ok(Command::Show),
            "total" => Ok(Command::Total),
            "invoice" | "checkout" => Ok(Command::Invoice),
            "clear" => Ok(Command::Clear),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}
