//! Console line classification

/// What a console line asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCommand<'a> {
    /// End the session
    Quit,
    /// Nothing but whitespace
    Empty,
    /// Anything else, trimmed
    Expression(&'a str),
}

/// Words that end the session (matched case-insensitively)
pub const QUIT_WORDS: [&str; 3] = ["q", "quit", "退出"];

/// Classify one line of console input
pub fn classify(line: &str) -> LineCommand<'_> {
    let line = line.trim();
    if line.is_empty() {
        LineCommand::Empty
    } else if QUIT_WORDS.iter().any(|w| w.eq_ignore_ascii_case(line)) {
        LineCommand::Quit
    } else {
        LineCommand::Expression(line)
    }
}
