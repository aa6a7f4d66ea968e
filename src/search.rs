//! Parallel best-guess search (C7): scores every dictionary word and returns
//! the top-scoring guesses with tie-breaking.

use std::sync::Mutex;

use crate::corpus::Corpus;
use crate::knowledge::Knowledge;
use crate::scoring::{num_tasks_for, score_guess_st};
use crate::word::{Word, WordFlags};

/// The outcome of a best-guess search: the best score found, up to
/// `max_out` distinct words achieving it, and how many tied in total (which
/// may exceed `max_out`).
#[derive(Debug, Clone)]
pub struct BestGuesses {
    pub best_score: f64,
    pub top: Vec<Word>,
    pub count: usize,
}

struct Shared {
    best_score: f64,
    top: Vec<Word>,
    count: usize,
}

fn suggest(out: &mut Shared, corpus: &Corpus, idx: usize, score: f64, max_out: usize, allow_slurs: bool) {
    if !allow_slurs {
        if let Some(attr) = corpus.attr_of(idx) {
            if attr.flags.contains(WordFlags::SLUR) {
                return;
            }
        }
    }

    if score > out.best_score {
        out.top.clear();
        out.count = 0;
        out.best_score = score;
    }
    if out.top.len() < max_out {
        out.top.push(corpus.all_words()[idx]);
    }
    out.count += 1;
}

/// Finds the best guess(es) for the current knowledge and live set.
///
/// Fast paths: empty knowledge with a loaded index returns the precomputed
/// first guess; a live set of size 0..=2 returns the remaining options
/// directly with the conventional `(5 - |O|) * 0.25` display score (this is
/// not a true expected value, see SPEC_FULL.md §9).
///
/// Otherwise scores the full dictionary in parallel, publishing the running
/// best to a mutex-protected record that every worker uses as an
/// early-exit threshold.
pub fn best_guesses(corpus: &Corpus, know: &Knowledge, live: &[Word], max_out: usize, allow_slurs: bool) -> BestGuesses {
    if know.is_none() {
        if let Some(attrs) = corpus.attrs() {
            return BestGuesses {
                best_score: attrs[0].starting_score,
                top: vec![corpus.all_words()[0]],
                count: 1,
            };
        }
    }

    if live.len() <= 2 {
        return BestGuesses {
            best_score: (5 - live.len()) as f64 * 0.25,
            top: live.to_vec(),
            count: live.len(),
        };
    }

    let all_words = corpus.all_words();
    let n = all_words.len();
    let tasks = num_tasks_for(n);

    let shared = Mutex::new(Shared { best_score: 0.0, top: Vec::with_capacity(max_out), count: 0 });

    crossbeam::scope(|scope| {
        for t in 0..tasks {
            let from = t * n / tasks;
            let to = (t + 1) * n / tasks;
            let shared = &shared;
            scope.spawn(move |_| {
                let mut break_at = shared.lock().unwrap().best_score;
                for i in from..to {
                    let guess = &all_words[i];
                    let attr = corpus.attr_of(i);
                    let score = score_guess_st(guess, attr.as_ref(), know, live, break_at);

                    if score >= break_at {
                        let mut out = shared.lock().unwrap();
                        if score >= out.best_score {
                            suggest(&mut out, corpus, i, score, max_out, allow_slurs);
                        }
                        break_at = out.best_score;
                    }
                }
            });
        }
    })
    .unwrap();

    let out = shared.into_inner().unwrap();
    BestGuesses { best_score: out.best_score, top: out.top, count: out.count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::corpus::Corpus;
    use crate::word::WordAttr;

    fn make_corpus(words: &[&str]) -> Corpus {
        let alphabet = Alphabet::new();
        let parsed: Vec<Word> = words
            .iter()
            .map(|s| Word::new(alphabet.scan_word(s.chars()).unwrap()))
            .collect();
        Corpus::from_raw_words(alphabet, parsed)
    }

    fn make_indexed_corpus(words: &[(&str, f64)]) -> Corpus {
        let alphabet = Alphabet::new();
        let parsed: Vec<Word> = words.iter().map(|(s, _)| Word::new(alphabet.scan_word(s.chars()).unwrap())).collect();
        let attrs: Vec<WordAttr> = words
            .iter()
            .map(|(_, score)| WordAttr { starting_score: *score, flags: WordFlags::TARGET })
            .collect();
        Corpus::from_index(alphabet, parsed, attrs)
    }

    #[test]
    fn test_empty_knowledge_fast_path_returns_index_zero() {
        let corpus = make_indexed_corpus(&[("slate", 0.9), ("crane", 0.8)]);
        let live = corpus.target_words();
        let result = best_guesses(&corpus, &Knowledge::none(), &live, 5, true);
        assert_eq!(result.top, vec![corpus.all_words()[0]]);
        assert_eq!(result.best_score, 0.9);
    }

    #[test]
    fn test_terminal_live_set_of_two() {
        let corpus = make_corpus(&["fuzzy", "jazzy"]);
        let live: Vec<Word> = corpus.all_words().to_vec();
        let result = best_guesses(&corpus, &Knowledge::none(), &live, 5, true);
        assert_eq!(result.best_score, 0.75);
        assert_eq!(result.count, 2);
        assert_eq!(result.top.len(), 2);
    }

    #[test]
    fn test_best_guess_over_small_dictionary() {
        let corpus = make_corpus(&["crane", "slate", "plane", "grape", "stale"]);
        // force the non-empty-knowledge path by constraining one letter so
        // the live set differs from the whole dictionary (>2 though).
        let live: Vec<Word> = corpus.all_words().to_vec();
        let mut know = Knowledge::none();
        know.exclude[0].insert(0); // arbitrary exclusion that doesn't empty the set
        let result = best_guesses(&corpus, &know, &live, 3, true);
        assert!(result.best_score > 0.0);
        assert!(!result.top.is_empty());
    }

    #[test]
    fn test_slur_filtered_from_suggestions() {
        let alphabet = Alphabet::new();
        let words = ["crane", "slate"];
        let parsed: Vec<Word> = words.iter().map(|s| Word::new(alphabet.scan_word(s.chars()).unwrap())).collect();
        // make the objectively-best first word (by construction, identical
        // scoring) a slur so it must be excluded from the top list.
        let attrs = vec![
            WordAttr { starting_score: 0.9, flags: WordFlags::TARGET | WordFlags::SLUR },
            WordAttr { starting_score: 0.8, flags: WordFlags::TARGET },
        ];
        let corpus = Corpus::from_index(alphabet, parsed, attrs);
        let live = corpus.target_words();

        // Non-empty knowledge that still matches every word here, so the
        // search falls through to the full scan instead of the
        // empty-knowledge fast path (which ignores slur status entirely).
        let mut know = Knowledge::none();
        know.exclude[4].insert(25); // neither word ends in 'Z'
        let mut live_gt_two = live.clone();
        live_gt_two.push(live[0]);
        let result = best_guesses(&corpus, &know, &live_gt_two, 5, false);
        assert!(!result.top.iter().any(|w| attrs_slur(&corpus, w)));
    }

    fn attrs_slur(corpus: &Corpus, word: &Word) -> bool {
        corpus
            .all_words()
            .iter()
            .position(|w| w == word)
            .and_then(|i| corpus.attr_of(i))
            .map(|a| a.flags.contains(WordFlags::SLUR))
            .unwrap_or(false)
    }
}
