//! The judge's feedback rule and the knowledge it implies.

use crate::bit_set::BitSet32;
use crate::error::Error;
use crate::hist::MAX_ALPHABET;
use crate::knowledge::Knowledge;
use crate::word::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    Dark,
    Yellow,
    Green,
}

pub type Colours = [Colour; 5];

pub fn all_green(colours: &Colours) -> bool {
    colours.iter().all(|&c| c == Colour::Green)
}

/// Parses a puzzle-mode feedback string (§6): exactly five characters from
/// `{'.', '-', '+'}` for dark/yellow/green. Anything else is rejected so the
/// caller can re-prompt rather than silently misinterpreting input.
pub fn parse_feedback_string(s: &str) -> Result<Colours, Error> {
    let chars: Vec<char> = s.trim().chars().collect();
    if chars.len() != 5 {
        return Err(Error::InvalidFeedback(s.to_string()));
    }
    let mut out = [Colour::Dark; 5];
    for (i, &ch) in chars.iter().enumerate() {
        out[i] = match ch {
            '.' => Colour::Dark,
            '-' => Colour::Yellow,
            '+' => Colour::Green,
            _ => return Err(Error::InvalidFeedback(s.to_string())),
        };
    }
    Ok(out)
}

/// Produces the colour pattern the judge would return for `guess` against
/// `target`. Handles repeated letters correctly: a guess letter appearing
/// more times than the target receives yellow/green only up to the target's
/// count, any extras are dark.
pub fn compare_to_target(guess: &Word, target: &Word) -> Colours {
    let mut residual = [0u8; MAX_ALPHABET as usize];
    for i in 0..5 {
        if guess[i] != target[i] {
            residual[target[i] as usize] += 1;
        }
    }

    let mut out = [Colour::Dark; 5];
    for i in 0..5 {
        out[i] = if guess[i] == target[i] {
            Colour::Green
        } else if residual[guess[i] as usize] > 0 {
            residual[guess[i] as usize] -= 1;
            Colour::Yellow
        } else {
            Colour::Dark
        };
    }
    out
}

/// Derives the knowledge implied by having made `guess` and observed
/// `colours`.
pub fn knowledge_from_colours(guess: &Word, colours: &Colours) -> Knowledge {
    let mut know = Knowledge::none();
    let mut seen_yellow = [false; MAX_ALPHABET as usize];

    for i in 0..5 {
        let letter = guess[i];
        match colours[i] {
            Colour::Green => {
                know.min_hist.add(letter);
                know.exclude[i] = BitSet32::full(MAX_ALPHABET as u32);
                know.exclude[i].remove(letter);
            }
            Colour::Yellow => {
                seen_yellow[letter as usize] = true;
                know.min_hist.add(letter);
                know.exclude[i].insert(letter);
            }
            Colour::Dark => {
                know.exclude[i].insert(letter);
            }
        }
    }

    // A dark letter not seen yellow anywhere in this guess is entirely
    // absent beyond whatever greens already fix it in place: rule out that
    // letter at every position the guess itself didn't place it.
    for i in 0..5 {
        let letter = guess[i];
        if colours[i] != Colour::Dark || seen_yellow[letter as usize] {
            continue;
        }
        for j in 0..5 {
            if guess[j] != letter {
                know.exclude[j].insert(letter);
            }
        }
    }

    know
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Word {
        let letters: Vec<u8> = s.bytes().map(|b| b.to_ascii_uppercase() - b'A').collect();
        Word::new(letters.try_into().unwrap())
    }

    #[test]
    fn test_exact_match() {
        let g = word("crane");
        let t = word("crane");
        let c = compare_to_target(&g, &t);
        assert!(all_green(&c));

        let k = knowledge_from_colours(&g, &c);
        assert!(k.matches(&t));
        assert!(!k.matches(&word("plane")));
    }

    #[test]
    fn test_repeated_letter_abbey_babes() {
        // guess ABBEY, target BABES => colours YYYGB
        let g = word("abbey");
        let t = word("babes");
        let c = compare_to_target(&g, &t);
        assert_eq!(
            c,
            [Colour::Yellow, Colour::Yellow, Colour::Yellow, Colour::Green, Colour::Dark]
        );

        let k = knowledge_from_colours(&g, &c);
        assert!(k.matches(&t));
        assert!(!k.matches(&g));
    }

    #[test]
    fn test_over_guessed_letter_goes_dark() {
        // guess LLAMA, target LATHE => second L has no match: dark, and
        // since L was never yellow, it's excluded everywhere but position 0.
        let g = word("llama");
        let t = word("lathe");
        let c = compare_to_target(&g, &t);
        assert_eq!(c[0], Colour::Green); // first L matches target's only L
        assert_eq!(c[1], Colour::Dark); // second L: no more Ls left in target

        let k = knowledge_from_colours(&g, &c);
        // L must be excluded at every non-green position
        for i in 1..5 {
            if g[i] != g[0] {
                assert!(k.exclude[i].contains(g[0]));
            }
        }
    }

    #[test]
    fn test_knowledge_admits_true_target_quickcheck_style() {
        let words = ["crane", "slate", "robot", "proxy", "fuzzy", "abbey", "babes"];
        for &gs in &words {
            for &ts in &words {
                let g = word(gs);
                let t = word(ts);
                let c = compare_to_target(&g, &t);
                let k = knowledge_from_colours(&g, &c);
                assert!(k.matches(&t), "guess={gs} target={ts}");
            }
        }
    }

    #[test]
    fn test_five_green_iff_equal() {
        let g = word("crane");
        assert!(all_green(&compare_to_target(&g, &word("crane"))));
        assert!(!all_green(&compare_to_target(&g, &word("plane"))));
    }

    #[test]
    fn test_parse_feedback_string() {
        assert_eq!(
            parse_feedback_string("+-.-.").unwrap(),
            [Colour::Green, Colour::Yellow, Colour::Dark, Colour::Yellow, Colour::Dark]
        );
        assert!(parse_feedback_string("+-.-").is_err()); // too short
        assert!(parse_feedback_string("+-.-x").is_err()); // bad character
    }
}
