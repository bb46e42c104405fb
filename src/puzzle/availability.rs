//! Which word buttons can still be pressed.
//!
//! Buttons are matched by value, not by the instance that was clicked: with two
//! "the" in the shuffle and one "the" in the answer, exactly one "the" stays
//! pressable no matter which of the two buttons was used.

use std::collections::HashMap;

fn counts<S: AsRef<str>>(words: &[S]) -> HashMap<&str, usize> {
    let mut map = HashMap::with_capacity(words.len());
    for w in words {
        *map.entry(w.as_ref()).or_insert(0) += 1;
    }
    map
}

pub fn remaining<S: AsRef<str>>(shuffled: &[S], answer: &[S], word: &str) -> usize {
    let total = shuffled.iter().filter(|w| w.as_ref() == word).count();
    let used = answer.iter().filter(|w| w.as_ref() == word).count();
    total.saturating_sub(used)
}

/// One flag per position in `shuffled`. For each value the first `total - used`
/// instances stay enabled, so a value is fully disabled once `used >= total`.
pub fn resolve<S: AsRef<str>>(shuffled: &[S], answer: &[S]) -> Vec<bool> {
    let mut left: HashMap<&str, usize> = counts(shuffled);
    for w in answer {
        if let Some(n) = left.get_mut(w.as_ref()) {
            *n = n.saturating_sub(1);
        }
    }
    shuffled
        .iter()
        .map(|w| match left.get_mut(w.as_ref()) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        })
        .collect()
}
