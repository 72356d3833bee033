//! The interactive chat: read a line, ask Gemini, print the answer, repeat.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::cli::{BANNER, EXIT_KEYWORDS, FAREWELL, MODEL_LABEL, USER_LABEL};
use crate::errors::GemError;
use crate::gemini::{ApiKey, Generate, Session};

/// Why the chat ended without an error.
#[derive(Debug, PartialEq, Eq)]
pub enum ChatEnd {
    /// The user typed `exit` or `quit`.
    Quit,
    /// Standard input was closed.
    EndOfInput,
}

/// Whether `input` is one of the exit keywords, ignoring case.
pub fn is_exit_keyword(input: &str) -> bool {
    let input = input.to_lowercase();
    EXIT_KEYWORDS.iter().any(|k| *k == input)
}

/// Drop the line terminator `read_line` keeps, and nothing else.
fn strip_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

/// Run the chat until an exit keyword, end of input, or the first error.
///
/// Turns are independent: only the latest line is sent, with no history.
pub fn chat<G: Generate, R: BufRead, W: Write>(
    model: &G,
    mut input: R,
    mut output: W,
) -> Result<ChatEnd, GemError> {
    writeln!(output, "{}", BANNER)?;
    let mut turns = 0usize;
    loop {
        write!(output, "{}", USER_LABEL)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            writeln!(output, "{}{}", MODEL_LABEL, FAREWELL)?;
            output.flush()?;
            info!(turns, "input closed, ending chat");
            return Ok(ChatEnd::EndOfInput);
        }
        strip_line_ending(&mut line);

        if is_exit_keyword(&line) {
            writeln!(output, "{}{}", MODEL_LABEL, FAREWELL)?;
            output.flush()?;
            info!(turns, "user quit");
            return Ok(ChatEnd::Quit);
        }

        turns += 1;
        debug!(turn = turns, "submitting");
        let answer = model.generate(&line)?;
        writeln!(output, "{}{}", MODEL_LABEL, answer)?;
        output.flush()?;
    }
}

/// Entry point of the `search` subcommand.
///
/// The session lives only inside this function, so it is released on every
/// return path, including errors.
pub fn run_search(_args: Vec<String>) -> Result<(), GemError> {
    let api_key = ApiKey::from_env()?;
    let session = Session::open(api_key)?;
    debug!(model = session.model(), "starting chat");

    let stdin = io::stdin();
    let stdout = io::stdout();
    chat(&session, stdin.lock(), stdout.lock())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::Cursor;

    use super::*;

    /// Answers from a script and records every prompt it was given.
    struct StubModel {
        answers: RefCell<Vec<Result<String, GemError>>>,
        prompts: RefCell<Vec<String>>,
    }

    impl StubModel {
        fn new(answers: Vec<Result<String, GemError>>) -> Self {
            let mut answers = answers;
            answers.reverse();
            StubModel {
                answers: RefCell::new(answers),
                prompts: RefCell::new(Vec::new()),
            }
        }

        fn echo() -> Self {
            Self::new(Vec::new())
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.borrow().clone()
        }
    }

    impl Generate for StubModel {
        fn generate(&self, prompt: &str) -> Result<String, GemError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.answers
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Ok(format!("echo {}", prompt)))
        }
    }

    fn run(model: &StubModel, input: &str) -> (Result<ChatEnd, GemError>, String) {
        let mut out = Vec::new();
        let res = chat(model, Cursor::new(input.to_string()), &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn exit_keywords_ignore_case() {
        for word in ["exit", "EXIT", "quit", "QUIT", "Quit", "eXiT"] {
            assert!(is_exit_keyword(word), "{word}");
        }
        for word in ["", "e", "q", " exit", "exit ", "quitting", "hello"] {
            assert!(!is_exit_keyword(word), "{word:?}");
        }
    }

    #[test]
    fn quit_prints_farewell_without_remote_call() {
        for word in ["exit", "EXIT", "quit", "QUIT"] {
            let model = StubModel::echo();
            let (res, out) = run(&model, &format!("{}\n", word));
            assert_eq!(res.unwrap(), ChatEnd::Quit);
            assert!(model.prompts().is_empty());
            assert_eq!(out, format!("{}\nyou: gemini: Goodbye!\n", BANNER));
        }
    }

    #[test]
    fn one_call_and_one_answer_per_line() {
        let model = StubModel::new(vec![Ok("Hi there".to_string())]);
        let (res, out) = run(&model, "hello\nquit\n");
        assert_eq!(res.unwrap(), ChatEnd::Quit);
        assert_eq!(model.prompts(), vec!["hello"]);
        assert_eq!(
            out,
            format!("{}\nyou: gemini: Hi there\nyou: gemini: Goodbye!\n", BANNER)
        );
    }

    #[test]
    fn repeated_query_is_sent_twice() {
        let model = StubModel::echo();
        let (res, out) = run(&model, "same\nsame\nexit\n");
        assert!(res.is_ok());
        assert_eq!(model.prompts(), vec!["same", "same"]);
        assert_eq!(out.matches("gemini: echo same\n").count(), 2);
    }

    #[test]
    fn only_the_line_terminator_is_stripped() {
        let model = StubModel::echo();
        let (res, _) = run(&model, "  padded  \r\nquit\r\n");
        assert_eq!(res.unwrap(), ChatEnd::Quit);
        assert_eq!(model.prompts(), vec!["  padded  "]);
    }

    #[test]
    fn end_of_input_ends_gracefully() {
        let model = StubModel::echo();
        let (res, out) = run(&model, "hello\n");
        assert_eq!(res.unwrap(), ChatEnd::EndOfInput);
        assert_eq!(model.prompts(), vec!["hello"]);
        assert!(out.ends_with("you: \ngemini: Goodbye!\n"));
    }

    #[test]
    fn last_line_without_newline_is_still_sent() {
        let model = StubModel::echo();
        let (res, _) = run(&model, "hello");
        assert_eq!(res.unwrap(), ChatEnd::EndOfInput);
        assert_eq!(model.prompts(), vec!["hello"]);
    }

    #[test]
    fn remote_error_stops_the_chat_immediately() {
        let model = StubModel::new(vec![
            Ok("first".to_string()),
            Err(GemError::Api {
                status: 429,
                body: "quota".to_string(),
            }),
        ]);
        let (res, out) = run(&model, "one\ntwo\nthree\n");
        assert!(matches!(res, Err(GemError::Api { status: 429, .. })));
        assert_eq!(model.prompts(), vec!["one", "two"]);
        // no third prompt after the failed second turn
        assert_eq!(out.matches(USER_LABEL).count(), 2);
        assert!(!out.contains("Goodbye"));
    }
}
