//! `fruitshop-cli`
//!
//! **Responsibility:** line-oriented terminal front end for the till.
//!
//! The shell is a thin presentation layer: it keeps the operator's raw
//! inputs (customer name, item choice, quantity text), forwards them to the
//! `Checkout` pipeline and prints whatever view comes back.

pub mod command;
pub mod shell;

pub use command::{Command, ParseError};
pub use shell::Shell;
