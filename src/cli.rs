use clap::{Parser, Subcommand};

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// The model every query is sent to.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
/// Base URL of the Generative Language `models` collection.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Printed once, after the session is established.
pub const BANNER: &str = "Start chatting! Type 'exit' or 'quit' to end the chat.";
/// Shown before each line of user input.
pub const USER_LABEL: &str = "you: ";
/// Prefix of every model answer.
pub const MODEL_LABEL: &str = "gemini: ";
pub const FAREWELL: &str = "Goodbye!";

/// Keywords (compared case-insensitively) that end the chat.
pub const EXIT_KEYWORDS: [&str; 2] = ["exit", "quit"];

/// CLI for `gemsearch`
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

/// gemsearch subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// A command to search for a query using the Gemini model. Starts an
    /// interactive chat; each line typed is sent to Gemini on its own.
    #[command(alias = "s")]
    Search {
        /// Currently ignored.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}
