use thiserror::Error;

/// Errors produced while parsing dictionaries, index files, or user-supplied
/// words and feedback. I/O failures and out-of-memory conditions are left to
/// the caller (propagated as `std::io::Error` / allocation failure is not
/// caught in safe Rust) — this enum covers the recoverable, data-shaped
/// failures named in the error handling design.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("word is not exactly 5 alphabet symbols")]
    InvalidWord,

    #[error("too many digraphs declared (max {max})", max = crate::alphabet::MAX_DIGRAPHS)]
    TooManyDigraphs,

    #[error("malformed dictionary line {line}: {reason}")]
    MalformedDictionary { line: usize, reason: String },

    #[error("malformed index line {line}: {reason}")]
    MalformedIndex { line: usize, reason: String },

    #[error("words out of score order at line {line}")]
    IndexOutOfOrder { line: usize },

    #[error("invalid feedback string: {0:?}")]
    InvalidFeedback(String),
}
