//! Fixed-length (5-symbol) words and the flags attached to each dictionary
//! entry.

use crate::hist::Histogram;

/// Five alphabet symbols. Equality is structural; the histogram is derived,
/// not independent state, so it does not need its own equality semantics
/// beyond what `letters` already determines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word {
    letters: [u8; 5],
    hist: Histogram,
}

impl Word {
    pub fn new(letters: [u8; 5]) -> Self {
        let mut hist = Histogram::new();
        for &l in &letters {
            hist.add(l);
        }
        Word { letters, hist }
    }

    pub fn letters(&self) -> &[u8; 5] {
        &self.letters
    }

    pub fn hist(&self) -> &Histogram {
        &self.hist
    }
}

impl std::ops::Index<usize> for Word {
    type Output = u8;
    fn index(&self, idx: usize) -> &u8 {
        &self.letters[idx]
    }
}

/// Flags attached to a dictionary entry, alongside its precomputed
/// first-guess score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct WordFlags(u8);

impl WordFlags {
    pub const TARGET: WordFlags = WordFlags(0x1);
    pub const EXPLICIT: WordFlags = WordFlags(0x2);
    pub const SLUR: WordFlags = WordFlags(0x4);

    pub const fn empty() -> Self {
        WordFlags(0)
    }

    pub fn contains(&self, other: WordFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: WordFlags) {
        self.0 |= other.0;
    }
}

impl std::ops::BitOr for WordFlags {
    type Output = WordFlags;
    fn bitor(self, rhs: WordFlags) -> WordFlags {
        WordFlags(self.0 | rhs.0)
    }
}

/// Per-word metadata stored alongside the dictionary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordAttr {
    pub starting_score: f64,
    pub flags: WordFlags,
}

#[test]
fn test_word_hist_matches_letters() {
    let w = Word::new([0, 1, 1, 2, 1]); // A B B C B
    assert_eq!(w.hist().count(0), 1);
    assert_eq!(w.hist().count(1), 3);
    assert_eq!(w.hist().count(2), 1);
    assert_eq!(w.hist().count(3), 0);
}

#[test]
fn test_word_flags() {
    let mut f = WordFlags::empty();
    assert!(!f.contains(WordFlags::TARGET));
    f.insert(WordFlags::TARGET);
    assert!(f.contains(WordFlags::TARGET));
    assert!(!f.contains(WordFlags::SLUR));
    let both = WordFlags::TARGET | WordFlags::SLUR;
    assert!(both.contains(WordFlags::TARGET));
    assert!(both.contains(WordFlags::SLUR));
    assert!(!both.contains(WordFlags::EXPLICIT));
}
