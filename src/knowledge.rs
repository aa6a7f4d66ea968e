//! The conjunction of constraints derivable from feedback so far: per-position
//! letter exclusions, plus a lower bound on how many times each letter must
//! appear in the target.

use crate::bit_set::BitSet32;
use crate::hist::Histogram;
use crate::word::Word;

/// `exclude[i]` bit `L` set means "position `i` cannot be letter `L`".
/// `min_hist` is a lower bound on the target's letter multiset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Knowledge {
    pub exclude: [BitSet32; 5],
    pub min_hist: Histogram,
}

impl Knowledge {
    /// The empty knowledge: nothing is known yet. Identity for [`absorb`].
    pub fn none() -> Self {
        Knowledge {
            exclude: [BitSet32::new(); 5],
            min_hist: Histogram::new(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.exclude.iter().all(BitSet32::is_empty) && self.min_hist.is_empty()
    }

    /// True iff `word` is consistent with every constraint held in `self`.
    pub fn matches(&self, word: &Word) -> bool {
        for i in 0..5 {
            if self.exclude[i].contains(word[i]) {
                return false;
            }
        }
        word.hist().is_superset_of(&self.min_hist)
    }

    /// Merges `other`'s constraints into `self`. Commutative, associative,
    /// and idempotent; [`Knowledge::none`] is the identity.
    pub fn absorb(&mut self, other: &Knowledge) {
        for i in 0..5 {
            self.exclude[i].union_with(&other.exclude[i]);
        }
        self.min_hist.union_with(&other.min_hist);
    }
}

#[test]
fn test_none_is_identity() {
    let none = Knowledge::none();
    assert!(none.is_none());

    let mut k = none;
    let mut other = Knowledge::none();
    other.exclude[0].insert(3);
    let expected = {
        let mut e = other;
        e.absorb(&none);
        e
    };
    k.absorb(&other);
    assert_eq!(k, expected);
}

#[test]
fn test_absorb_commutative_associative_idempotent() {
    let mut a = Knowledge::none();
    a.exclude[0].insert(1);
    a.min_hist.add(2);

    let mut b = Knowledge::none();
    b.exclude[1].insert(4);
    b.min_hist.add(2);

    let mut c = Knowledge::none();
    c.exclude[2].insert(7);

    let mut ab = a;
    ab.absorb(&b);
    let mut ba = b;
    ba.absorb(&a);
    assert_eq!(ab, ba); // commutative

    let mut ab_c = ab;
    ab_c.absorb(&c);
    let mut bc = b;
    bc.absorb(&c);
    let mut a_bc = a;
    a_bc.absorb(&bc);
    assert_eq!(ab_c, a_bc); // associative

    let mut idem = ab_c;
    idem.absorb(&ab_c);
    assert_eq!(idem, ab_c); // idempotent
}

#[test]
fn test_matches() {
    let mut k = Knowledge::none();
    k.exclude[0].insert(0); // position 0 cannot be 'A' (code 0)
    k.min_hist.add(4); // must contain at least one 'E' (code 4)

    let w_ok = Word::new([1, 0, 0, 4, 4]); // B A A E E
    assert!(k.matches(&w_ok));

    let w_bad_pos = Word::new([0, 1, 2, 4, 4]); // starts with A -> excluded
    assert!(!k.matches(&w_bad_pos));

    let w_missing_letter = Word::new([1, 2, 3, 1, 1]); // no E at all
    assert!(!k.matches(&w_missing_letter));
}
