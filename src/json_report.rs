//! Per-round JSON report (§6), serialised the way `bot.c`'s `jsonify_reports`
//! builds its object: the user's guess, the colours received, the optional
//! best-guess list, the remaining options, and the elimination count.

use serde::Serialize;

use crate::alphabet::Alphabet;
use crate::feedback::{Colour, Colours};
use crate::session::{GuessReport, RoundReport};

#[derive(Debug, Serialize)]
pub struct JsonGuess {
    pub word: String,
    pub score: f64,
}

impl JsonGuess {
    fn from_report(alphabet: &Alphabet, report: &GuessReport) -> Self {
        JsonGuess { word: alphabet.print_word(report.guess.letters()), score: report.score }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonRound {
    pub user: JsonGuess,
    pub colors: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<Vec<JsonGuess>>,
    #[serde(rename = "optionsLeft")]
    pub options_left: Vec<String>,
    pub eliminated: usize,
}

fn colour_char(c: Colour) -> char {
    match c {
        Colour::Dark => 'B',
        Colour::Yellow => 'Y',
        Colour::Green => 'G',
    }
}

fn colours_string(colours: &Colours) -> String {
    colours.iter().map(|&c| colour_char(c)).collect()
}

/// Builds the JSON-serialisable report for one round. `optionsLeft` is the
/// live set *after* absorbing this round's feedback, printed in the
/// dictionary's current alphabet.
pub fn round_to_json(alphabet: &Alphabet, round: &RoundReport) -> JsonRound {
    JsonRound {
        user: JsonGuess::from_report(alphabet, &round.guess),
        colors: colours_string(&round.colours),
        best: round.best.as_ref().map(|best| best.iter().map(|g| JsonGuess::from_report(alphabet, g)).collect()),
        options_left: round.options_left_words.iter().map(|w| alphabet.print_word(w.letters())).collect(),
        eliminated: round.eliminated,
    }
}
