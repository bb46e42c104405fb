use rand::Rng;

/// In-place Fisher–Yates: one uniform draw from `0..=i` per position,
/// so every permutation is equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle(&mut out, rng);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn sorted(mut v: Vec<&str>) -> Vec<&str> {
        v.sort_unstable();
        v
    }

    #[test]
    fn shuffle_preserves_the_multiset() {
        let sentence = "the cat sat on the mat";
        let words: Vec<&str> = sentence.split(' ').collect();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = shuffled(&words, &mut rng);
            assert_eq!(sorted(out), sorted(words.clone()));
        }
    }

    #[test]
    fn short_inputs_are_left_alone() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec!["solo"];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, ["solo"]);
    }

    #[test]
    fn every_permutation_of_three_shows_up_evenly() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen: HashMap<Vec<u8>, usize> = HashMap::new();
        let runs = 6000;
        for _ in 0..runs {
            *seen.entry(shuffled(&[1u8, 2, 3], &mut rng)).or_default() += 1;
        }
        assert_eq!(seen.len(), 6);
        // expected 1000 each; a biased shuffle lands far outside this band
        for count in seen.values() {
            assert!((850..=1150).contains(count), "skewed distribution: {:?}", seen);
        }
    }
}
