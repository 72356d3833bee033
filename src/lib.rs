//! # gemsearch
//! Chat with Gemini from your terminal!
//!
//! A command line program that sends each line you type to Google's Gemini model and prints the answer.
//! Every line is an independent query: no history is kept or sent.
//!
//! ## Usage
//! These are the library crate documentation for `gemsearch`. For usage of the binary see
//! ```shell
//! $ gemsearch --help
//! ```
//!
//! ## Environment Variables:
//! - `GEMINI_API_KEY`: Required. The Gemini API key used for every query.
//! - `RUST_LOG`: Optional. Diagnostic log filter (e.g. `gemsearch=debug`). Logs go to stderr.
//!
//! ## Notes:
//! - Type `exit` or `quit` (any case), or close stdin, to end the chat.
//! - Any failure (missing key, network error, API error) ends the program with exit status 1.
//!
pub mod cli;
pub mod errors;
pub mod gemini;
pub mod session;
