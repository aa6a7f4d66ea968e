//! The dictionary (immutable after load) and the live candidate subset that
//! shrinks as a session absorbs knowledge, plus the raw word-list and index
//! file formats described in the external interfaces.

use std::io::{BufRead, Write};

use crate::alphabet::Alphabet;
use crate::error::Error;
use crate::knowledge::Knowledge;
use crate::word::{Word, WordAttr, WordFlags};

/// The full dictionary: every word the solver may propose as a guess, plus
/// (if loaded from an index file) per-word attributes and the digraph table
/// that was in effect when the words were scanned.
///
/// Stored in non-increasing `starting_score` order when attributes are
/// present, so index 0 is always the globally best first guess.
pub struct Corpus {
    alphabet: Alphabet,
    all_words: Vec<Word>,
    attrs: Option<Vec<WordAttr>>,
}

impl Corpus {
    pub fn from_raw_words(alphabet: Alphabet, all_words: Vec<Word>) -> Self {
        Corpus { alphabet, all_words, attrs: None }
    }

    pub fn from_index(alphabet: Alphabet, all_words: Vec<Word>, attrs: Vec<WordAttr>) -> Self {
        debug_assert_eq!(all_words.len(), attrs.len());
        Corpus { alphabet, all_words, attrs: Some(attrs) }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn all_words(&self) -> &[Word] {
        &self.all_words
    }

    pub fn attrs(&self) -> Option<&[WordAttr]> {
        self.attrs.as_deref()
    }

    pub fn attr_of(&self, index: usize) -> Option<WordAttr> {
        self.attrs.as_ref().map(|a| a[index])
    }

    /// The subset of words eligible as a hidden target: those flagged
    /// `TARGET`, or the whole dictionary if no attributes (hence no TARGET
    /// flag) are loaded.
    pub fn target_words(&self) -> Vec<Word> {
        match &self.attrs {
            Some(attrs) => self
                .all_words
                .iter()
                .zip(attrs)
                .filter(|(_, a)| a.flags.contains(WordFlags::TARGET))
                .map(|(w, _)| *w)
                .collect(),
            None => self.all_words.clone(),
        }
    }
}

/// The live candidate set: the subset of [`Corpus::target_words`] still
/// consistent with all knowledge absorbed so far this session.
#[derive(Clone)]
pub struct LiveSet {
    words: Vec<Word>,
}

impl LiveSet {
    pub fn new(corpus: &Corpus) -> Self {
        LiveSet { words: corpus.target_words() }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Compacts the live set in place, retaining only words matching `k`.
    /// Returns the number of words eliminated.
    pub fn filter(&mut self, k: &Knowledge) -> usize {
        let before = self.words.len();
        self.words.retain(|w| k.matches(w));
        before - self.words.len()
    }

    /// The number of words that would remain after filtering by `k`,
    /// without mutating the live set.
    pub fn count_matches(&self, k: &Knowledge) -> usize {
        self.words.iter().filter(|w| k.matches(w)).count()
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Parses the raw word-list format (§6): one five-letter word per line, no
/// header, blank lines ignored. Uses a digraph-free alphabet, matching the
/// canonical loader this format is grounded on.
pub fn load_raw_words(reader: impl BufRead) -> Result<Vec<Word>, Error> {
    let alphabet = Alphabet::new();
    let mut words = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::MalformedDictionary { line: lineno + 1, reason: e.to_string() })?;
        if is_blank(&line) {
            continue;
        }
        let letters = alphabet.scan_word(line.chars()).map_err(|_| Error::MalformedDictionary {
            line: lineno + 1,
            reason: format!("expected a 5-letter word, got {line:?}"),
        })?;
        words.push(Word::new(letters));
    }
    Ok(words)
}

/// Parses a sorted word list used as a target-subset or slur-list file for
/// the index builder: same raw format, but the result stays sorted by the
/// caller for binary-search membership tests.
pub fn load_sorted_word_list(reader: impl BufRead) -> Result<Vec<Word>, Error> {
    let mut words = load_raw_words(reader)?;
    words.sort_by_key(|w| *w.letters());
    Ok(words)
}

const DIGRAPH_PREFIX: &str = "#DIGRAPH ";

/// Parses the index file format (§6): word count, zero or more `#DIGRAPH`
/// header lines, then `N` lines of `WORD SCORE [FLAGS]` in non-increasing
/// score order.
pub fn load_index(mut reader: impl BufRead) -> Result<Corpus, Error> {
    let mut header = String::new();
    reader
        .read_line(&mut header)
        .map_err(|e| Error::MalformedIndex { line: 1, reason: e.to_string() })?;
    let n: usize = header.trim().parse().map_err(|_| Error::MalformedIndex {
        line: 1,
        reason: "expected dictionary size".to_string(),
    })?;

    let mut alphabet = Alphabet::new();
    let mut lineno = 1;
    let mut words = Vec::with_capacity(n);
    let mut attrs = Vec::with_capacity(n);
    let mut last_score = 1.0f64;

    for line in reader.lines() {
        lineno += 1;
        let line = line.map_err(|e| Error::MalformedIndex { line: lineno, reason: e.to_string() })?;
        if let Some(pair) = line.strip_prefix(DIGRAPH_PREFIX) {
            let mut chars = pair.chars();
            let fst = chars.next();
            let snd = chars.next();
            match (fst, snd) {
                (Some(f), Some(s)) if f.is_ascii_alphabetic() && s.is_ascii_alphabetic() => {
                    alphabet.add_digraph(f, s)?;
                }
                _ => {
                    return Err(Error::MalformedIndex {
                        line: lineno,
                        reason: "expected two letters after #DIGRAPH".to_string(),
                    })
                }
            }
            continue;
        }

        let mut parts = line.split_whitespace();
        let word_tok = parts.next().ok_or_else(|| Error::MalformedIndex {
            line: lineno,
            reason: "missing word".to_string(),
        })?;
        let score_tok = parts.next().ok_or_else(|| Error::MalformedIndex {
            line: lineno,
            reason: "missing score".to_string(),
        })?;
        let flags_tok = parts.next();

        let letters = alphabet.scan_word(word_tok.chars()).map_err(|_| Error::MalformedIndex {
            line: lineno,
            reason: format!("bad word {word_tok:?}"),
        })?;

        let score = parse_fixed_score(score_tok).ok_or_else(|| Error::MalformedIndex {
            line: lineno,
            reason: format!("bad score {score_tok:?}"),
        })?;
        if score > last_score {
            return Err(Error::IndexOutOfOrder { line: lineno });
        }
        last_score = score;

        let mut flags = WordFlags::empty();
        if let Some(tok) = flags_tok {
            for ch in tok.chars() {
                flags.insert(match ch {
                    't' => WordFlags::TARGET,
                    'x' => WordFlags::EXPLICIT,
                    's' => WordFlags::SLUR,
                    _ => {
                        return Err(Error::MalformedIndex {
                            line: lineno,
                            reason: format!("unknown flag char {ch:?}"),
                        })
                    }
                });
            }
        }

        words.push(Word::new(letters));
        attrs.push(WordAttr { starting_score: score, flags });
    }

    if words.len() != n {
        return Err(Error::MalformedIndex {
            line: lineno,
            reason: format!("expected {n} words, got {}", words.len()),
        });
    }

    Ok(Corpus::from_index(alphabet, words, attrs))
}

fn parse_fixed_score(tok: &str) -> Option<f64> {
    let digits = tok.strip_prefix("0.")?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let iscore: u32 = digits.parse().ok()?;
    Some(iscore as f64 / 1_000_000.0)
}

/// Writes the index file format (§6): used by the offline index builder.
/// `entries` must already be sorted by non-increasing score.
pub fn write_index(
    mut writer: impl Write,
    alphabet: &Alphabet,
    entries: &[(Word, WordAttr)],
) -> std::io::Result<()> {
    writeln!(writer, "{}", entries.len())?;
    for dg in alphabet.digraphs() {
        writeln!(
            writer,
            "#DIGRAPH {}{}",
            (b'A' + dg.fst) as char,
            (b'A' + dg.snd) as char
        )?;
    }

    for (word, attr) in entries {
        let iscore = (attr.starting_score * 1_000_000.0).round().clamp(0.0, 999_999.0) as u32;
        write!(writer, "{} 0.{:06}", alphabet.print_word(word.letters()), iscore)?;
        if attr.flags.contains(WordFlags::TARGET)
            || attr.flags.contains(WordFlags::EXPLICIT)
            || attr.flags.contains(WordFlags::SLUR)
        {
            write!(writer, " ")?;
            if attr.flags.contains(WordFlags::TARGET) {
                write!(writer, "t")?;
            }
            if attr.flags.contains(WordFlags::EXPLICIT) {
                write!(writer, "x")?;
            }
            if attr.flags.contains(WordFlags::SLUR) {
                write!(writer, "s")?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_load_raw_words_blank_lines_and_case() {
        let data = "crane\n\nSLATE\nro-bot\n";
        let words = load_raw_words(Cursor::new(data)).unwrap();
        assert_eq!(words.len(), 3);
    }

    #[test]
    fn test_index_roundtrip() {
        let alphabet = Alphabet::new();
        let w1 = Word::new(alphabet.scan_word("slate".chars()).unwrap());
        let w2 = Word::new(alphabet.scan_word("crane".chars()).unwrap());
        let entries = vec![
            (w1, WordAttr { starting_score: 0.5, flags: WordFlags::TARGET }),
            (w2, WordAttr { starting_score: 0.25, flags: WordFlags::empty() }),
        ];
        let mut buf = Vec::new();
        write_index(&mut buf, &alphabet, &entries).unwrap();

        let corpus = load_index(Cursor::new(buf)).unwrap();
        assert_eq!(corpus.all_words().len(), 2);
        assert_eq!(corpus.attr_of(0).unwrap().starting_score, 0.5);
        assert!(corpus.attr_of(0).unwrap().flags.contains(WordFlags::TARGET));
        assert_eq!(corpus.attr_of(1).unwrap().starting_score, 0.25);
    }

    #[test]
    fn test_index_out_of_order_is_error() {
        let data = "2\nAAAAA 0.100000\nBBBBB 0.200000\n";
        let err = load_index(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfOrder { .. }));
    }

    #[test]
    fn test_live_set_filter_is_idempotent() {
        let alphabet = Alphabet::new();
        let words: Vec<Word> = ["crane", "slate", "plane"]
            .iter()
            .map(|s| Word::new(alphabet.scan_word(s.chars()).unwrap()))
            .collect();
        let corpus = Corpus::from_raw_words(alphabet, words);
        let mut live = LiveSet::new(&corpus);

        let mut k = Knowledge::none();
        k.exclude[0].insert(corpus.all_words()[0].letters()[0]); // exclude 'C' or 'S' or 'P' at pos 0, whichever crane starts with
        let first_count = live.filter(&k);
        let len_after_first = live.len();
        let second_count = live.filter(&k);
        assert_eq!(second_count, 0);
        assert_eq!(live.len(), len_after_first);
        let _ = first_count;
    }
}
