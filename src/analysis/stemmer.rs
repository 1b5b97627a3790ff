//! Porter stemming algorithm implementation.
//!
//! Reduces English words to their stems so that a query token matches the
//! inflected forms stored in the index ("running" and "runs" both stem to
//! "run"). Non-ASCII words are returned unchanged; the measure-based rules
//! below are only meaningful for English.

/// Porter stemmer for English query tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }

    /// Stem a single word. The input is lowercased first.
    pub fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();
        if word.chars().count() <= 2 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return word;
        }

        let word = step1a(&word);
        let word = step1b(&word);
        let word = step1c(&word);
        let word = rewrite_suffix(&word, STEP2_RULES, 1);
        let word = rewrite_suffix(&word, STEP3_RULES, 1);
        let word = step4(&word);
        step5(&word)
    }
}

/// Vowel test at a byte position; `y` counts as a vowel after a consonant.
fn is_vowel(word: &[u8], pos: usize) -> bool {
    match word[pos] {
        b'a' | b'e' | b'i' | b'o' | b'u' => true,
        b'y' => pos > 0 && !is_vowel(word, pos - 1),
        _ => false,
    }
}

fn contains_vowel(word: &str) -> bool {
    let bytes = word.as_bytes();
    (0..bytes.len()).any(|i| is_vowel(bytes, i))
}

/// The Porter "measure": the number of vowel-consonant transitions.
fn measure(word: &str) -> usize {
    let bytes = word.as_bytes();
    let n = bytes.len();
    let mut m = 0;
    let mut i = 0;

    while i < n && !is_vowel(bytes, i) {
        i += 1;
    }
    while i < n {
        while i < n && is_vowel(bytes, i) {
            i += 1;
        }
        if i >= n {
            break;
        }
        m += 1;
        while i < n && !is_vowel(bytes, i) {
            i += 1;
        }
    }
    m
}

fn ends_double_consonant(word: &str) -> bool {
    let bytes = word.as_bytes();
    let n = bytes.len();
    n >= 2 && bytes[n - 1] == bytes[n - 2] && !is_vowel(bytes, n - 1)
}

/// Consonant-vowel-consonant ending, where the final consonant is not w/x/y.
fn ends_cvc(word: &str) -> bool {
    let bytes = word.as_bytes();
    let n = bytes.len();
    n >= 3
        && !is_vowel(bytes, n - 3)
        && is_vowel(bytes, n - 2)
        && !is_vowel(bytes, n - 1)
        && !matches!(bytes[n - 1], b'w' | b'x' | b'y')
}

/// Apply the first matching (suffix, replacement) rule whose stem measure
/// meets the minimum. Returns the word unchanged when nothing matches.
fn rewrite_suffix(word: &str, rules: &[(&str, &str)], min_measure: usize) -> String {
    for (suffix, replacement) in rules {
        if let Some(stem) = word.strip_suffix(suffix) {
            if measure(stem) >= min_measure {
                return format!("{stem}{replacement}");
            }
            return word.to_string();
        }
    }
    word.to_string()
}

const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("ization", "ize"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("tional", "tion"),
    ("biliti", "ble"),
    ("entli", "ent"),
    ("ousli", "ous"),
    ("ation", "ate"),
    ("alism", "al"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("ator", "ate"),
    ("eli", "e"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ness", ""),
    ("ful", ""),
];

/// Plurals: sses -> ss, ies -> i, trailing s dropped (but not ss).
fn step1a(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("sses") {
        format!("{stem}ss")
    } else if let Some(stem) = word.strip_suffix("ies") {
        format!("{stem}i")
    } else if word.ends_with("ss") {
        word.to_string()
    } else if let Some(stem) = word.strip_suffix('s') {
        stem.to_string()
    } else {
        word.to_string()
    }
}

/// -eed/-ed/-ing removal with the standard cleanup of the exposed stem.
fn step1b(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("eed") {
        return if measure(stem) > 0 {
            format!("{stem}ee")
        } else {
            word.to_string()
        };
    }

    let stripped = word
        .strip_suffix("ing")
        .or_else(|| word.strip_suffix("ed"))
        .filter(|stem| contains_vowel(stem));

    let Some(stem) = stripped else {
        return word.to_string();
    };

    if stem.ends_with("at") || stem.ends_with("bl") || stem.ends_with("iz") {
        format!("{stem}e")
    } else if ends_double_consonant(stem) && !matches!(stem.as_bytes().last(), Some(b'l' | b's' | b'z')) {
        stem[..stem.len() - 1].to_string()
    } else if measure(stem) == 1 && ends_cvc(stem) {
        format!("{stem}e")
    } else {
        stem.to_string()
    }
}

/// Final y -> i when the stem contains a vowel.
fn step1c(word: &str) -> String {
    match word.strip_suffix('y') {
        Some(stem) if contains_vowel(stem) => format!("{stem}i"),
        _ => word.to_string(),
    }
}

fn step4(word: &str) -> String {
    const SUFFIXES: &[&str] = &[
        "ement", "ance", "ence", "able", "ible", "ment", "ant", "ent", "ion", "ism", "ate", "iti",
        "ous", "ive", "ize", "al", "er", "ic", "ou",
    ];

    for suffix in SUFFIXES {
        if let Some(stem) = word.strip_suffix(suffix) {
            if measure(stem) > 1 && (*suffix != "ion" || stem.ends_with('s') || stem.ends_with('t'))
            {
                return stem.to_string();
            }
            return word.to_string();
        }
    }
    word.to_string()
}

/// Drop a final -e and collapse -ll on long stems.
fn step5(word: &str) -> String {
    let word = match word.strip_suffix('e') {
        Some(stem) => {
            let m = measure(stem);
            if m > 1 || (m == 1 && !ends_cvc(stem)) {
                stem.to_string()
            } else {
                word.to_string()
            }
        }
        None => word.to_string(),
    };

    if word.ends_with("ll") && measure(&word) > 1 {
        word[..word.len() - 1].to_string()
    } else {
        word
    }
}
