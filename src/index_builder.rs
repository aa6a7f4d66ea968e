//! Offline index builder (C8): precomputes the first-guess score for every
//! dictionary word against the empty-knowledge state, so the interactive
//! solver can serve the (by far most expensive) opening guess from a table.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::knowledge::Knowledge;
use crate::scoring::score_guess_st;
use crate::word::{Word, WordAttr, WordFlags};

/// Number of static ranges the dictionary is partitioned into. Fixed at 8,
/// matching the original index builder's hardcoded task count (the index
/// build runs once, offline; unlike the interactive solver's `MIN_WORK`
/// chunking, there is no need to scale chunk count to dictionary size).
const NUM_BUILD_TASKS: usize = 8;

fn is_member(sorted: &[Word], word: &Word) -> bool {
    sorted.binary_search_by_key(word.letters(), |w| *w.letters()).is_ok()
}

fn flags_for(word: &Word, targets: Option<&[Word]>, slurs: Option<&[Word]>) -> WordFlags {
    let mut flags = WordFlags::empty();
    if targets.map_or(false, |t| is_member(t, word)) {
        flags.insert(WordFlags::TARGET);
    }
    if slurs.map_or(false, |s| is_member(s, word)) {
        flags.insert(WordFlags::SLUR);
    }
    flags
}

/// Builds the (word, attr) table for every word in `all_words`, scored
/// against [`Knowledge::none`]. `targets` and `slurs`, if given, must
/// already be sorted alphabetically by letter code (see
/// [`crate::corpus::load_sorted_word_list`]); membership is tested by
/// binary search as in the original `calc_attrs`.
///
/// The returned vector is in the same order as `all_words`, not yet sorted
/// by score — callers sort before writing the index file.
pub fn build_index(all_words: &[Word], targets: Option<&[Word]>, slurs: Option<&[Word]>, verbose: bool) -> Vec<(Word, WordAttr)> {
    let n = all_words.len();
    let flags: Vec<WordFlags> = all_words.iter().map(|w| flags_for(w, targets, slurs)).collect();

    let live: Vec<Word> = if targets.is_some() && flags.iter().any(|f| f.contains(WordFlags::TARGET)) {
        all_words
            .iter()
            .zip(&flags)
            .filter(|(_, f)| f.contains(WordFlags::TARGET))
            .map(|(w, _)| *w)
            .collect()
    } else {
        all_words.to_vec()
    };

    let know = Knowledge::none();
    let progress = AtomicUsize::new(0);
    let mut scores = vec![0.0f64; n];

    crossbeam::scope(|scope| {
        let mut handles = Vec::with_capacity(NUM_BUILD_TASKS);
        let mut last = 0;
        for task in 0..NUM_BUILD_TASKS {
            let from = last;
            last += (n - last) / (NUM_BUILD_TASKS - task);
            let to = last;
            let slice = &all_words[from..to];
            let progress = &progress;
            handles.push(scope.spawn(move |_| {
                let mut part_scores = Vec::with_capacity(slice.len());
                for word in slice.iter() {
                    // mkwx.c passes NULL here: at empty knowledge every word
                    // matches, so the tie-break bonus applies unconditionally
                    // rather than being gated on the word's own TARGET flag.
                    let s = score_guess_st(word, None, &know, &live, 0.0);
                    part_scores.push(s);
                    let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
                    if verbose {
                        log::info!("{done} / {n} words scored");
                    }
                }
                (from, part_scores)
            }));
        }
        for h in handles {
            let (from, part_scores) = h.join().unwrap();
            scores[from..from + part_scores.len()].copy_from_slice(&part_scores);
        }
    })
    .unwrap();

    all_words
        .iter()
        .zip(flags)
        .zip(scores)
        .map(|((&word, flags), starting_score)| (word, WordAttr { starting_score, flags }))
        .collect()
}

/// Sorts `entries` by non-increasing score, as the index file format
/// requires.
pub fn sort_by_descending_score(entries: &mut [(Word, WordAttr)]) {
    entries.sort_by(|a, b| b.1.starting_score.partial_cmp(&a.1.starting_score).unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;

    fn w(alphabet: &Alphabet, s: &str) -> Word {
        Word::new(alphabet.scan_word(s.chars()).unwrap())
    }

    #[test]
    fn test_build_index_produces_sorted_scores_and_flags() {
        let alphabet = Alphabet::new();
        let words = vec![
            w(&alphabet, "crane"),
            w(&alphabet, "slate"),
            w(&alphabet, "proxy"),
            w(&alphabet, "fuzzy"),
        ];
        let mut targets = vec![w(&alphabet, "crane"), w(&alphabet, "slate")];
        targets.sort_by_key(|x| *x.letters());

        let mut entries = build_index(&words, Some(&targets), None, false);
        assert_eq!(entries.len(), 4);

        for (word, attr) in &entries {
            let is_target = targets.contains(word);
            assert_eq!(attr.flags.contains(WordFlags::TARGET), is_target);
        }

        sort_by_descending_score(&mut entries);
        for pair in entries.windows(2) {
            assert!(pair[0].1.starting_score >= pair[1].1.starting_score);
        }
    }

    #[test]
    fn test_no_target_list_means_every_word_is_a_candidate() {
        let alphabet = Alphabet::new();
        let words = vec![w(&alphabet, "crane"), w(&alphabet, "slate")];
        let entries = build_index(&words, None, None, false);
        for (_, attr) in &entries {
            assert!(!attr.flags.contains(WordFlags::TARGET));
        }
    }
}
