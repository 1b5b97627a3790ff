//! Levenshtein distance and the normalized similarity metric used for
//! dictionary-driven word correction.

use std::cmp::min;

/// Calculate the Levenshtein distance between two strings: the minimum
/// number of single-character insertions, deletions, or substitutions
/// required to change one into the other. Operates on chars, not bytes.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    // Two-row rolling matrix.
    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for i in 1..=len1 {
        curr_row[0] = i;

        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] {
                0
            } else {
                1
            };

            curr_row[j] = min(
                min(
                    prev_row[j] + 1,     // deletion
                    curr_row[j - 1] + 1, // insertion
                ),
                prev_row[j - 1] + cost, // substitution
            );
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Normalized similarity in [0.0, 1.0]: `1 - distance / max(len1, len2)`.
/// Two empty strings are identical (1.0).
pub fn similarity(s1: &str, s2: &str) -> f64 {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();
    let longest = len1.max(len2);

    if longest == 0 {
        return 1.0;
    }

    1.0 - levenshtein_distance(s1, s2) as f64 / longest as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("catz", "cats"), 1);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("same", "same"), 0);
    }

    #[test]
    fn test_levenshtein_is_char_based() {
        // One char edit, not a byte count.
        assert_eq!(levenshtein_distance("café", "cafe"), 1);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("same", "same"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
        assert!((similarity("catz", "cats") - 0.75).abs() < 1e-9);
        // "pic" vs "picture": distance 4 over length 7.
        assert!((similarity("pic", "picture") - (1.0 - 4.0 / 7.0)).abs() < 1e-9);
    }
}
