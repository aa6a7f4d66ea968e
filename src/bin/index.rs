use std::fs::File;
use std::io::{self, BufReader, BufWriter};

use clap::Parser;

use wordsmith_core::index_builder::{build_index, sort_by_descending_score};
use wordsmith_core::{load_raw_words, load_sorted_word_list, write_index, Alphabet};

/// Builds the precomputed first-guess index (§6) from a raw word list.
#[derive(Parser)]
#[clap(name = "wordsmith-index")]
struct Args {
    /// Raw word-list file to index.
    word_list: String,

    /// Output path for the index file (stdout if omitted).
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Print progress while scoring.
    #[clap(short = 'v')]
    verbose: bool,

    /// Restrict eligible hidden targets to this word list (sorted for lookup).
    #[clap(long = "target")]
    target: Option<String>,

    /// Words to flag as slurs, filtered from suggestions by default.
    #[clap(long = "slur")]
    slur: Option<String>,
}

fn load_sorted(path: &str) -> io::Result<Vec<wordsmith_core::Word>> {
    let file = File::open(path)?;
    load_sorted_word_list(BufReader::new(file)).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let word_list_file = match File::open(&args.word_list) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("failed to open {}: {e}", args.word_list);
            std::process::exit(1);
        }
    };
    let all_words = match load_raw_words(BufReader::new(word_list_file)) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("malformed dictionary: {e}");
            std::process::exit(1);
        }
    };

    let targets = match args.target.as_deref().map(load_sorted) {
        Some(Ok(w)) => Some(w),
        Some(Err(e)) => {
            eprintln!("failed to load target list: {e}");
            std::process::exit(1);
        }
        None => None,
    };
    let slurs = match args.slur.as_deref().map(load_sorted) {
        Some(Ok(w)) => Some(w),
        Some(Err(e)) => {
            eprintln!("failed to load slur list: {e}");
            std::process::exit(1);
        }
        None => None,
    };

    let mut entries = build_index(&all_words, targets.as_deref(), slurs.as_deref(), args.verbose);
    sort_by_descending_score(&mut entries);

    // the raw word-list loader uses a digraph-free alphabet; any digraph
    // declarations belong to the output index's header only if a future
    // dictionary format grows them, so an empty table is written here.
    let alphabet = Alphabet::new();

    let result = match &args.output {
        Some(path) => File::create(path).and_then(|f| write_index(BufWriter::new(f), &alphabet, &entries)),
        None => write_index(io::stdout().lock(), &alphabet, &entries),
    };

    if let Err(e) = result {
        eprintln!("failed to write index: {e}");
        std::process::exit(1);
    }
}
