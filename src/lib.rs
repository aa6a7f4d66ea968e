pub mod alphabet;
pub mod bit_set;
pub mod corpus;
pub mod error;
pub mod feedback;
pub mod hist;
pub mod index_builder;
pub mod json_report;
pub mod knowledge;
pub mod scoring;
pub mod search;
pub mod session;
pub mod word;

pub use alphabet::Alphabet;
pub use corpus::{load_index, load_raw_words, load_sorted_word_list, write_index, Corpus, LiveSet};
pub use error::Error;
pub use feedback::{all_green, compare_to_target, knowledge_from_colours, parse_feedback_string, Colour, Colours};
pub use knowledge::Knowledge;
pub use scoring::score_guess;
pub use search::{best_guesses, BestGuesses};
pub use session::{
    run_session, FeedbackSource, Guesser, Oracle, RoundReport, SessionOutcome, WordSource,
    DEFAULT_EXTENDED_INITIAL_POOL,
};
pub use word::{Word, WordAttr, WordFlags};
