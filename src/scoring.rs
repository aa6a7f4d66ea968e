//! Expected-remaining-candidates scoring for a single guess (C6).
//!
//! `score(g, K) = 1 + [g matches K] / n^2 - (1/n^2) * sum_t |filter(K + colours(g,t))|`
//! over the live set `O` of size `n`. Higher is better.

use crate::corpus::Corpus;
use crate::feedback::{compare_to_target, knowledge_from_colours};
use crate::knowledge::Knowledge;
use crate::word::{Word, WordAttr, WordFlags};

pub const MIN_WORK: usize = 128;
pub const MAX_TASKS: usize = 256;

/// Number of parallel chunks for a workload of `n` items: at least
/// [`MIN_WORK`] items per chunk, never more than [`MAX_TASKS`] chunks, and
/// never more than the available CPUs (`score.c`'s `cpu_count()` feeding
/// `threadpool_create`; the teacher's `main.rs` does the same with
/// `num_cpus::get()`).
pub fn num_tasks_for(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let cpu_cap = num_cpus::get().max(1);
    (n.div_ceil(MIN_WORK)).clamp(1, MAX_TASKS.min(cpu_cap))
}

fn chunk_bounds(n: usize, tasks: usize, t: usize) -> (usize, usize) {
    (t * n / tasks, (t + 1) * n / tasks)
}

fn bonus_applies(attr: Option<&WordAttr>, guess: &Word, know: &Knowledge) -> bool {
    attr.map_or(true, |a| a.flags.contains(WordFlags::TARGET)) && know.matches(guess)
}

/// Post-filter candidate count if `guess` were played against hypothetical
/// `target`, starting from knowledge `know` and live set `live`.
fn simulated_remaining(guess: &Word, know: &Knowledge, target: &Word, live: &[Word]) -> usize {
    let colours = compare_to_target(guess, target);
    let delta = knowledge_from_colours(guess, &colours);
    let mut sim = *know;
    sim.absorb(&delta);
    live.iter().filter(|w| sim.matches(w)).count()
}

/// Single-threaded scoring with early exit: returns a lower bound on the
/// true score as soon as the running total drops below `break_at`. Used by
/// [`crate::search::best_guesses`] to prune guesses already known to be
/// worse than the current best.
pub fn score_guess_st(guess: &Word, attr: Option<&WordAttr>, know: &Knowledge, live: &[Word], break_at: f64) -> f64 {
    let n = live.len();
    debug_assert!(n > 0);
    let norm = 1.0 / (n as f64 * n as f64);

    let mut score = 1.0;
    if bonus_applies(attr, guess, know) {
        score += norm;
    }

    for target in live {
        let remaining = simulated_remaining(guess, know, target, live);
        score -= remaining as f64 * norm;
        if score < break_at {
            break;
        }
    }
    score
}

/// Parallel scoring: partitions `live` into chunks and sums partial scores
/// on a scoped thread pool. Deterministic: the sum is order-independent
/// since addition on the `1/n^2` rational grid is associative.
fn score_guess_parallel(guess: &Word, attr: Option<&WordAttr>, know: &Knowledge, live: &[Word]) -> f64 {
    let n = live.len();
    debug_assert!(n > 0);
    let norm = 1.0 / (n as f64 * n as f64);
    let bonus = if bonus_applies(attr, guess, know) { norm } else { 0.0 };

    let tasks = num_tasks_for(n);
    let partials: Vec<f64> = crossbeam::scope(|scope| {
        let handles: Vec<_> = (0..tasks)
            .map(|t| {
                let (from, to) = chunk_bounds(n, tasks, t);
                let slice = &live[from..to];
                scope.spawn(move |_| {
                    let mut part = 0.0;
                    for target in slice {
                        part -= simulated_remaining(guess, know, target, live) as f64 * norm;
                    }
                    part
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
    .unwrap();

    1.0 + bonus + partials.iter().sum::<f64>()
}

/// Scores `guess` against the live set `live` under knowledge `know`. If
/// `know` is empty and `corpus` carries precomputed attributes, returns the
/// cached first-guess score instead of rescanning the whole live set.
pub fn score_guess(corpus: &Corpus, guess: &Word, know: &Knowledge, live: &[Word]) -> f64 {
    if know.is_none() {
        if let Some(attrs) = corpus.attrs() {
            if let Some(idx) = index_of(corpus, guess) {
                return attrs[idx].starting_score;
            }
        }
    }

    let attr = index_of(corpus, guess).and_then(|i| corpus.attr_of(i));
    score_guess_parallel(guess, attr.as_ref(), know, live)
}

/// Linear search for `guess`'s position in the dictionary, mirroring the
/// original `index_of_word`: dictionaries are a few thousand words, and this
/// is only called once per externally supplied guess, not in the scoring
/// inner loop.
fn index_of(corpus: &Corpus, word: &Word) -> Option<usize> {
    corpus.all_words().iter().position(|w| w == word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::corpus::Corpus;

    fn make_corpus(words: &[&str]) -> Corpus {
        let alphabet = Alphabet::new();
        let parsed: Vec<Word> = words
            .iter()
            .map(|s| Word::new(alphabet.scan_word(s.chars()).unwrap()))
            .collect();
        Corpus::from_raw_words(alphabet, parsed)
    }

    #[test]
    fn test_score_in_bounds() {
        let corpus = make_corpus(&["crane", "slate", "robot", "proxy", "fuzzy"]);
        let live: Vec<Word> = corpus.all_words().to_vec();
        let n = live.len() as f64;
        let know = Knowledge::none();
        for guess in &live {
            let s = score_guess(&corpus, guess, &know, &live);
            assert!(s >= 0.0 && s <= 1.0 + 1.0 / (n * n) + 1e-9, "score {s} out of bounds");
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let corpus = make_corpus(&["crane", "slate", "robot", "proxy", "fuzzy", "abbey", "babes", "llama", "lathe"]);
        let live: Vec<Word> = corpus.all_words().to_vec();
        let know = Knowledge::none();
        for guess in &live {
            let par = score_guess_parallel(guess, None, &know, &live);
            let seq = score_guess_st(guess, None, &know, &live, f64::NEG_INFINITY);
            assert!((par - seq).abs() < 1e-12, "parallel {par} != sequential {seq}");
        }
    }

    #[test]
    fn test_exact_match_scores_maximum() {
        // a single-candidate live set: the only guess that could possibly be
        // asked for gets the full win bonus.
        let corpus = make_corpus(&["crane"]);
        let live: Vec<Word> = corpus.all_words().to_vec();
        let know = Knowledge::none();
        let s = score_guess(&corpus, &live[0], &know, &live);
        // n=1: bonus=1/1^2=1, remaining after playing the only option is 1,
        // so score = 1 + 1 - 1*1 = 1.
        assert!((s - 1.0).abs() < 1e-9);
    }
}
