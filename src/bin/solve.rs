use std::fs::File;
use std::io::{self, BufReader, Write};

use clap::Parser;
use rand::Rng;

use wordsmith_core::{
    all_green, load_index, parse_feedback_string, run_session, Alphabet, Colours, FeedbackSource,
    Guesser, Knowledge, Oracle, RoundReport, Word, WordSource, DEFAULT_EXTENDED_INITIAL_POOL,
};

/// Interactive wordle solver and coach, driven by a precomputed index file.
#[derive(Parser)]
#[clap(name = "wordsmith-solve")]
struct Args {
    /// The secret target word, if known in advance.
    word: Option<String>,

    /// Coaching mode: read guesses from standard input instead of playing them.
    #[clap(short = 'c')]
    coach: bool,

    /// Path to the index file built by wordsmith-index.
    #[clap(short = 'i', long = "index")]
    index: Option<String>,

    /// Emit each round as a JSON object instead of plain text.
    #[clap(short = 'j')]
    json: bool,

    /// Print the dictionary's word list and exit.
    #[clap(short = 'l')]
    list: bool,

    /// Quiet output (repeatable).
    #[clap(short = 'q', parse(from_occurrences))]
    quiet: u8,

    /// Verbose output (repeatable).
    #[clap(short = 'v', parse(from_occurrences))]
    verbose: u8,

    /// Select a random target word instead of reading one positionally.
    #[clap(short = 'r')]
    random: bool,

    /// Keep the target word out of the printed report.
    #[clap(short = 's')]
    secret: bool,

    /// Randomise the opening guess among the top-scoring candidates.
    #[clap(short = 'x')]
    extended_initial: bool,

    /// Colon-separated list of pre-planned guesses (`-g w1:w2:...`).
    #[clap(short = 'g', long = "given")]
    given: Option<String>,
}

struct StdinWords<'a> {
    alphabet: &'a Alphabet,
}
impl<'a> WordSource for StdinWords<'a> {
    fn next_word(&mut self) -> Option<Word> {
        loop {
            print!("guess> ");
            io::stdout().flush().ok()?;
            let mut line = String::new();
            if io::stdin().read_line(&mut line).ok()? == 0 {
                return None;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }
            match self.alphabet.scan_word(trimmed.chars()) {
                Ok(letters) => return Some(Word::new(letters)),
                Err(_) => eprintln!("not a valid word, try again"),
            }
        }
    }
}

struct StdinFeedback;
impl FeedbackSource for StdinFeedback {
    fn next_feedback(&mut self) -> Option<Colours> {
        loop {
            print!("feedback (. dark, - yellow, + green)> ");
            io::stdout().flush().ok()?;
            let mut line = String::new();
            if io::stdin().read_line(&mut line).ok()? == 0 {
                return None;
            }
            match parse_feedback_string(line.trim()) {
                Ok(colours) => return Some(colours),
                Err(_) => eprintln!("invalid feedback string, try again"),
            }
        }
    }
}

fn print_round(round: &RoundReport, alphabet: &Alphabet, json: bool, mask_final: bool) {
    if json {
        let json_round = wordsmith_core::json_report::round_to_json(alphabet, round);
        if let Ok(text) = serde_json::to_string(&json_round) {
            println!("{text}");
        }
        return;
    }

    let solved = all_green(&round.colours);
    let printed_word = if mask_final && solved {
        "*****".to_string()
    } else {
        alphabet.print_word(round.guess.guess.letters())
    };

    println!(
        "guessed {} (score {:.4}) -> {} remaining: {}, eliminated: {}",
        printed_word,
        round.guess.score,
        if solved { "solved" } else { "continuing" },
        round.options_left,
        round.eliminated
    );
    if let Some(delta) = round.score_delta {
        println!("got score {:.1}% ({:+.1}%)", round.guess.score * 100.0, delta * 100.0);
    }
    if let Some(best) = &round.best {
        for b in best {
            println!("  also considered: {} ({:.4})", alphabet.print_word(b.guess.letters()), b.score);
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let index_path = args.index.clone().or_else(|| std::env::var("WORDSMITH_INDEX").ok());
    let index_path = match index_path {
        Some(p) => p,
        None => {
            eprintln!("no index loaded: pass -i PATH or set WORDSMITH_INDEX");
            std::process::exit(1);
        }
    };

    let file = match File::open(&index_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("failed to open index {index_path}: {e}");
            std::process::exit(1);
        }
    };
    let corpus = match load_index(BufReader::new(file)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("malformed index: {e}");
            std::process::exit(1);
        }
    };

    if args.list {
        for word in corpus.all_words() {
            println!("{}", corpus.alphabet().print_word(word.letters()));
        }
        return;
    }

    let max_best = 5;
    let allow_slurs = false;

    let mut rng = rand::thread_rng();

    let target = if args.random {
        let targets = corpus.target_words();
        if targets.is_empty() {
            eprintln!("dictionary has no target-eligible words");
            std::process::exit(1);
        }
        let idx = rng.gen_range(0..targets.len());
        Some(targets[idx])
    } else if let Some(word) = &args.word {
        match corpus.alphabet().scan_word(word.chars()) {
            Ok(letters) => Some(Word::new(letters)),
            Err(_) => {
                eprintln!("invalid word: {word}");
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    let mut stdin_words = StdinWords { alphabet: corpus.alphabet() };
    let mut stdin_feedback = StdinFeedback;

    let guesser = if let Some(given) = &args.given {
        let guesses: Result<Vec<_>, _> = given.split(':').map(|w| corpus.alphabet().scan_word(w.chars()).map(Word::new)).collect();
        match guesses {
            Ok(guesses) => Guesser::Given { guesses, next: 0 },
            Err(_) => {
                eprintln!("invalid given-guess list: {given}");
                std::process::exit(1);
            }
        }
    } else if args.coach {
        Guesser::User { source: &mut stdin_words }
    } else {
        Guesser::Bot {
            extended_initial: if args.extended_initial { Some(DEFAULT_EXTENDED_INITIAL_POOL) } else { None },
            rng: &mut rng,
        }
    };

    let oracle = match target {
        Some(word) => Oracle::FixedTarget(word),
        None => Oracle::Puzzle { source: &mut stdin_feedback },
    };

    let outcome = run_session(&corpus, Knowledge::none(), guesser, oracle, max_best, allow_slurs);

    let effective_verbosity = args.verbose as i32 - args.quiet as i32;
    if effective_verbosity > -1 {
        for round in &outcome.rounds {
            print_round(round, corpus.alphabet(), args.json, args.secret);
        }
    }

    if outcome.succeeded {
        println!("solved in {} guesses", outcome.rounds.len());
    } else {
        println!("did not solve (ran out of candidates or guesses)");
        std::process::exit(1);
    }
}
