//! The interactive play loop (C9): choose a guess, consult an oracle for
//! colours, absorb the resulting knowledge, filter the live set, repeat
//! until solved or exhausted.

use rand::RngCore;

use crate::corpus::{Corpus, LiveSet};
use crate::feedback::{all_green, compare_to_target, knowledge_from_colours, Colours};
use crate::knowledge::Knowledge;
use crate::scoring::score_guess;
use crate::search::best_guesses;
use crate::word::Word;

/// Default size of the "extended initial word selection" pool (`bot.c`'s
/// `-x` flag): when enabled, the bot's opening guess is picked uniformly at
/// random from the top this-many dictionary entries instead of always
/// playing the single best one.
pub const DEFAULT_EXTENDED_INITIAL_POOL: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessReport {
    pub guess: Word,
    pub score: f64,
}

/// Supplies guesses typed by a human. Implemented by the binary over
/// standard input; kept as a trait here so the driver stays testable
/// without a terminal.
pub trait WordSource {
    fn next_word(&mut self) -> Option<Word>;
}

/// Supplies feedback colours typed by a human playing against an external
/// judge (puzzle mode).
pub trait FeedbackSource {
    fn next_feedback(&mut self) -> Option<Colours>;
}

pub enum Guesser<'a> {
    /// Always plays the top-scoring guess, unless `extended_initial` is set
    /// and knowledge is still empty, in which case it plays a uniformly
    /// random pick among the top `extended_initial` dictionary entries.
    Bot { extended_initial: Option<usize>, rng: &'a mut dyn RngCore },
    /// Reads a guess from `source` each round (coach mode: the driver still
    /// computes the best list so the caller can report how the human's
    /// guess compares).
    User { source: &'a mut dyn WordSource },
    /// Plays a fixed, pre-planned sequence of guesses. Only the final given
    /// guess gets a best-list computed (`bot.c`'s `skippable`), since
    /// nobody reads the others.
    Given { guesses: Vec<Word>, next: usize },
}

pub enum Oracle<'a> {
    FixedTarget(Word),
    Puzzle { source: &'a mut dyn FeedbackSource },
}

pub struct RoundReport {
    pub guess: GuessReport,
    pub colours: Colours,
    pub best: Option<Vec<GuessReport>>,
    /// `guess.score - best[0].score`, i.e. how far the played guess fell
    /// short of (or exceeded, for the bot's own guess) the best available
    /// score this round. `None` when no best list was computed.
    pub score_delta: Option<f64>,
    pub options_left: usize,
    /// The live set, post-filter, as of this round — the JSON report's
    /// `optionsLeft` needs the actual words, not just the count.
    pub options_left_words: Vec<Word>,
    pub eliminated: usize,
    /// False for skipped given-guess rounds: nothing meaningful to report.
    pub reportable: bool,
}

pub struct SessionOutcome {
    pub rounds: Vec<RoundReport>,
    pub succeeded: bool,
}

fn extended_initial_pick(corpus: &Corpus, pool: usize, rng: &mut dyn RngCore) -> Word {
    let bound = pool.min(corpus.all_words().len()).max(1);
    let idx = (rng.next_u32() as usize) % bound;
    corpus.all_words()[idx]
}

enum NextGuess {
    Play { guess: Word, best: Option<Vec<GuessReport>> },
    Stop,
}

fn choose_guess(corpus: &Corpus, know: &Knowledge, live: &LiveSet, guesser: &mut Guesser, max_best: usize, allow_slurs: bool) -> NextGuess {
    match guesser {
        Guesser::Bot { extended_initial, rng } => {
            let best = best_guesses(corpus, know, live.words(), max_best, allow_slurs);
            let guess = match extended_initial {
                Some(pool) if know.is_none() => extended_initial_pick(corpus, *pool, *rng),
                _ => best.top[0],
            };
            let reports = best.top.iter().map(|&w| GuessReport { guess: w, score: best.best_score }).collect();
            NextGuess::Play { guess, best: Some(reports) }
        }
        Guesser::User { source } => match source.next_word() {
            Some(word) => {
                let best = best_guesses(corpus, know, live.words(), max_best, allow_slurs);
                let reports = best.top.iter().map(|&w| GuessReport { guess: w, score: best.best_score }).collect();
                NextGuess::Play { guess: word, best: Some(reports) }
            }
            None => NextGuess::Stop,
        },
        Guesser::Given { guesses, next } => {
            if *next >= guesses.len() {
                return NextGuess::Stop;
            }
            let guess = guesses[*next];
            let is_last = *next == guesses.len() - 1;
            *next += 1;
            if is_last {
                let best = best_guesses(corpus, know, live.words(), max_best, allow_slurs);
                let reports = best.top.iter().map(|&w| GuessReport { guess: w, score: best.best_score }).collect();
                NextGuess::Play { guess, best: Some(reports) }
            } else {
                NextGuess::Play { guess, best: None }
            }
        }
    }
}

fn ask_oracle(guess: &Word, oracle: &mut Oracle) -> Option<Colours> {
    match oracle {
        Oracle::FixedTarget(target) => Some(compare_to_target(guess, target)),
        Oracle::Puzzle { source } => source.next_feedback(),
    }
}

/// Runs one full session: `know0` is usually [`Knowledge::none`], but a
/// caller resuming a partially-played puzzle may seed it with knowledge
/// absorbed elsewhere.
pub fn run_session(corpus: &Corpus, know0: Knowledge, mut guesser: Guesser, mut oracle: Oracle, max_best: usize, allow_slurs: bool) -> SessionOutcome {
    let mut live = LiveSet::new(corpus);
    let mut know = know0;
    live.filter(&know);

    let mut rounds = Vec::new();
    let mut succeeded = false;

    while !live.is_empty() {
        let (guess, best) = match choose_guess(corpus, &know, &live, &mut guesser, max_best, allow_slurs) {
            NextGuess::Play { guess, best } => (guess, best),
            NextGuess::Stop => break,
        };

        let guess_score = score_guess(corpus, &guess, &know, live.words());

        let colours = match ask_oracle(&guess, &mut oracle) {
            Some(c) => c,
            None => break,
        };

        let delta = knowledge_from_colours(&guess, &colours);
        know.absorb(&delta);
        let eliminated = live.filter(&know);

        let reportable = best.is_some();
        let score_delta = best.as_ref().and_then(|b| b.first()).map(|b| guess_score - b.score);
        rounds.push(RoundReport {
            guess: GuessReport { guess, score: guess_score },
            colours,
            best,
            score_delta,
            options_left: live.len(),
            options_left_words: live.words().to_vec(),
            eliminated,
            reportable,
        });

        if all_green(&colours) {
            succeeded = true;
            break;
        }
    }

    SessionOutcome { rounds, succeeded }
}
