//! Porter stemming algorithm implementation.
//!
//! This module provides an implementation of the Porter stemming algorithm,
//! a widely-used algorithm for reducing English words to their stems.
//!
//! # Algorithm
//!
//! The Porter stemmer applies a series of rewrite rules in five steps:
//! 1. Plurals and -ed/-ing suffixes
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and -ll
//!
//! Every rewrite only shortens the word or substitutes a suffix of at most
//! the same length, so the working buffer never outgrows the input token.
//!
//! # Examples
//!
//! ```
//! use ftmark::analysis::token_filter::stem::Stemmer;
//! use ftmark::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("flies"), "fli");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::language::Language;
use crate::analysis::token_filter::stem::Stemmer;

/// Step 2 substitutions, first match wins.
const STEP2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

/// Step 3 substitutions, first match wins.
const STEP3: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

/// Step 4 removals. `-ion` after `s`/`t` is handled before this table.
const STEP4: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ou", "ism",
    "ate", "iti", "ous", "ive", "ize",
];

/// Working copy of one token.
///
/// `end` is the current length of the stem. Suffix tests hand back the stem
/// boundary instead of stashing it, so each step sees exactly the state the
/// previous one returned.
#[derive(Debug)]
struct StemBuffer {
    bytes: Vec<u8>,
    end: usize,
}

impl StemBuffer {
    fn new(word: &str) -> Self {
        let bytes = word.as_bytes().to_vec();
        let end = bytes.len();
        StemBuffer { bytes, end }
    }

    /// Lowercased byte at `pos`.
    fn byte(&self, pos: usize) -> u8 {
        self.bytes[pos].to_ascii_lowercase()
    }

    /// Boundary of the stem if the buffer ends with `suffix`.
    fn suffix(&self, suffix: &str) -> Option<usize> {
        let stem = self.end.checked_sub(suffix.len())?;
        suffix
            .bytes()
            .enumerate()
            .all(|(i, b)| self.byte(stem + i) == b)
            .then_some(stem)
    }

    /// Vowel flags of `[0, upto)` in one pass.
    ///
    /// A vowel is a, e, i, o, u, or a y following a consonant.
    fn vowels(&self, upto: usize) -> Vec<bool> {
        let mut flags: Vec<bool> = Vec::with_capacity(upto);
        for pos in 0..upto {
            let vowel = match self.byte(pos) {
                b'a' | b'e' | b'i' | b'o' | b'u' => true,
                b'y' => pos != 0 && !flags[pos - 1],
                _ => false,
            };
            flags.push(vowel);
        }
        flags
    }

    fn is_vowel(&self, pos: usize) -> bool {
        self.vowels(pos + 1)[pos]
    }

    fn has_vowel(&self, upto: usize) -> bool {
        self.vowels(upto).contains(&true)
    }

    /// Number of vowel-to-consonant transitions in `[0, upto)`.
    fn measure(&self, upto: usize) -> usize {
        let mut count = 0;
        let mut in_vowels = false;
        for vowel in self.vowels(upto) {
            if in_vowels != vowel {
                if in_vowels {
                    count += 1;
                }
                in_vowels = vowel;
            }
        }
        count
    }

    /// Consonant-vowel-consonant ending at `len`, last consonant not w, x or y.
    fn is_cvc(&self, len: usize) -> bool {
        if len < 3 {
            return false;
        }
        let flags = self.vowels(len);
        !matches!(self.byte(len - 1), b'w' | b'x' | b'y')
            && !flags[len - 1]
            && flags[len - 2]
            && !flags[len - 3]
    }

    /// Replace everything after `stem` with `with`.
    fn replace(&mut self, stem: usize, with: &str) {
        let end = stem + with.len();
        debug_assert!(end <= self.bytes.len());
        self.bytes[stem..end].copy_from_slice(with.as_bytes());
        self.end = end;
    }

    fn append(&mut self, b: u8) {
        debug_assert!(self.end < self.bytes.len());
        self.bytes[self.end] = b;
        self.end += 1;
    }

    fn into_string(mut self, original: &str) -> String {
        self.bytes.truncate(self.end);
        String::from_utf8(self.bytes).unwrap_or_else(|_| original.to_string())
    }
}

/// Step 1: plurals, -eed, -ed, -ing and terminal y.
fn step1(mut buf: StemBuffer) -> StemBuffer {
    if buf.suffix("s").is_some() {
        if buf.suffix("sses").is_some() || buf.suffix("ies").is_some() {
            buf.end -= 2;
        } else if buf.byte(buf.end - 2) != b's' {
            buf.end -= 1;
        }
    }

    if let Some(stem) = buf.suffix("eed") {
        if buf.measure(stem) > 0 {
            buf.end -= 1;
        }
    } else if let Some(stem) = buf.suffix("ed").or_else(|| buf.suffix("ing")) {
        if buf.has_vowel(stem) {
            buf.end = stem;
            if buf.suffix("at").is_some() || buf.suffix("bl").is_some() || buf.suffix("iz").is_some()
            {
                buf.append(b'e');
            } else if buf.end > 1 {
                let last = buf.byte(buf.end - 1);
                let doubled = last == buf.byte(buf.end - 2)
                    && last.is_ascii_alphabetic()
                    && !buf.is_vowel(buf.end - 1);
                if doubled && !matches!(last, b'l' | b's' | b'z') {
                    buf.end -= 1;
                } else if buf.measure(buf.end) == 1 && buf.is_cvc(buf.end) {
                    buf.append(b'e');
                }
            }
        }
    }

    if let Some(stem) = buf.suffix("y") {
        if buf.has_vowel(stem) {
            buf.replace(stem, "i");
        }
    }
    buf
}

/// Steps 2 and 3: first matching suffix is substituted if the stem has m > 0.
fn substitute(mut buf: StemBuffer, rules: &[(&str, &str)]) -> StemBuffer {
    for (suffix, replacement) in rules {
        if let Some(stem) = buf.suffix(suffix) {
            if buf.measure(stem) > 0 {
                buf.replace(stem, replacement);
            }
            break;
        }
    }
    buf
}

fn step2(buf: StemBuffer) -> StemBuffer {
    substitute(buf, STEP2)
}

fn step3(buf: StemBuffer) -> StemBuffer {
    substitute(buf, STEP3)
}

/// Step 4: remove a suffix if the stem has m > 1.
fn step4(mut buf: StemBuffer) -> StemBuffer {
    if buf.suffix("tion").is_some() || buf.suffix("sion").is_some() {
        let stem = buf.end - 3;
        if buf.measure(stem) > 1 {
            buf.end = stem;
            return buf;
        }
    }

    for suffix in STEP4 {
        if let Some(stem) = buf.suffix(suffix) {
            if buf.measure(stem) > 1 {
                buf.end = stem;
            }
            break;
        }
    }
    buf
}

/// Step 5: tidy up a final -e and -ll.
fn step5(mut buf: StemBuffer) -> StemBuffer {
    if let Some(stem) = buf.suffix("e") {
        let m = buf.measure(stem);
        if m > 1 || (m == 1 && !buf.is_cvc(stem)) {
            buf.end = stem;
        }
    }

    if buf.suffix("ll").is_some() && buf.measure(buf.end - 1) > 1 {
        buf.end -= 1;
    }
    buf
}

/// Porter stemming algorithm implementation.
///
/// Suffix tests are ASCII case-insensitive; letters introduced by a rewrite
/// are lowercase. Tokens shorter than three bytes are returned as is.
#[derive(Debug, Clone, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        if word.len() < 3 {
            return word.to_string();
        }

        let buf = StemBuffer::new(word);
        let buf = step5(step4(step3(step2(step1(buf)))));
        buf.into_string(word)
    }

    fn name(&self) -> &'static str {
        "porter"
    }

    fn languages(&self) -> &[Language] {
        &[Language::English]
    }

    fn priority(&self) -> u32 {
        1000
    }
}
