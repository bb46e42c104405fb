use super::availability;
use super::evaluator::{self, Verdict};
use super::shuffle;
use crate::models::{Sentence, RANDOM_GROUP};
use rand::Rng;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("group `{group}` has no sentences")]
    EmptyPool { group: String },
}

/// The randomized run through one group of one language.
#[derive(Debug, Clone)]
pub struct Session {
    pub group: String,
    /// group-filtered sentences before shuffling, reused by restart
    sentences: Vec<Sentence>,
    pool: Vec<Sentence>,
    current_index: usize,
    complete: bool,
}

impl Session {
    pub fn pool(&self) -> &[Sentence] {
        &self.pool
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn current_sentence(&self) -> Option<&Sentence> {
        if self.complete {
            return None;
        }
        self.pool.get(self.current_index)
    }

    pub fn is_last_sentence(&self) -> bool {
        self.current_index + 1 >= self.pool.len()
    }
}

/// One sentence being reassembled.
#[derive(Debug, Clone)]
pub struct Round {
    shuffled_words: Vec<String>,
    answer: Vec<String>,
    started: Instant,
}

impl Round {
    pub fn new(shuffled_words: Vec<String>) -> Self {
        Self {
            shuffled_words,
            answer: Vec::new(),
            started: Instant::now(),
        }
    }

    pub fn shuffled_words(&self) -> &[String] {
        &self.shuffled_words
    }

    pub fn answer(&self) -> &[String] {
        &self.answer
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn remaining(&self, word: &str) -> usize {
        availability::remaining(&self.shuffled_words, &self.answer, word)
    }

    pub fn availability(&self) -> Vec<bool> {
        availability::resolve(&self.shuffled_words, &self.answer)
    }

    /// Appends `word` if an unused instance of it is left.
    pub fn push_word(&mut self, word: &str) -> bool {
        if self.is_complete() || self.remaining(word) == 0 {
            return false;
        }
        self.answer.push(word.to_string());
        true
    }

    /// Removes by position in the answer; the rest keep their relative order.
    pub fn remove_at(&mut self, position: usize) -> Option<String> {
        if position < self.answer.len() {
            Some(self.answer.remove(position))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.answer.clear();
    }

    pub fn is_complete(&self) -> bool {
        evaluator::is_complete(&self.answer, &self.shuffled_words)
    }

    pub fn evaluate(&self, canonical: &str) -> Option<Verdict> {
        evaluator::evaluate(&self.answer, &self.shuffled_words, canonical)
    }
}

#[derive(Debug, Default)]
pub struct PuzzleState {
    session: Option<Session>,
    round: Option<Round>,
}

impl PuzzleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn round_mut(&mut self) -> Option<&mut Round> {
        self.round.as_mut()
    }

    pub fn current_sentence(&self) -> Option<&Sentence> {
        self.session.as_ref().and_then(Session::current_sentence)
    }

    pub fn is_last_sentence(&self) -> bool {
        self.session.as_ref().map_or(true, Session::is_last_sentence)
    }

    /// Filters `sentences` by `group` ("random" keeps all of them) and shuffles the result
    /// into a fresh pool. On error the previous state is left untouched.
    pub fn start_session<R: Rng + ?Sized>(
        &mut self,
        language: &str,
        sentences: &[Sentence],
        group: &str,
        rng: &mut R,
    ) -> Result<(), PuzzleError> {
        let filtered: Vec<Sentence> = sentences
            .iter()
            .filter(|s| group == RANDOM_GROUP || s.groups.contains(group))
            .cloned()
            .collect();

        if filtered.is_empty() {
            return Err(PuzzleError::EmptyPool {
                group: group.to_string(),
            });
        }

        let pool = shuffle::shuffled(&filtered, rng);
        debug!(language, group, pool = pool.len(), "session started");

        self.session = Some(Session {
            group: group.to_string(),
            sentences: filtered,
            pool,
            current_index: 0,
            complete: false,
        });
        self.round = None;
        Ok(())
    }

    /// Shuffles the current sentence into a new round. No-op without a current sentence.
    pub fn start_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let Some(sentence) = self.current_sentence() else {
            return false;
        };
        let mut words = sentence.words();
        shuffle::shuffle(&mut words, rng);
        self.round = Some(Round::new(words));
        true
    }

    /// Moves to the next sentence, marking the session complete after the last one.
    pub fn advance(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.complete {
            return true;
        }
        session.current_index += 1;
        if session.current_index >= session.pool.len() {
            session.current_index = session.pool.len();
            session.complete = true;
            self.round = None;
        }
        session.complete
    }

    /// New pool from the same sentences, back to the first one.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.pool = shuffle::shuffled(&session.sentences, rng);
        session.current_index = 0;
        session.complete = false;
        self.round = None;
        self.start_round(rng)
    }

    pub fn clear(&mut self) {
        self.session = None;
        self.round = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn corpus() -> Vec<Sentence> {
        vec![
            Sentence::with_groups("I am here", ["short", "affirmative"]),
            Sentence::with_groups("She is not at home today", ["medium", "negative"]),
            Sentence::with_groups("Are you ready", ["short", "interrogative"]),
            Sentence::with_groups("We do not like cold rainy mornings in the city", ["long", "negative"]),
            Sentence::with_groups("It works", ["short"]),
            Sentence::new("Untagged sentences still count for random"),
        ]
    }

    fn texts(sentences: &[Sentence]) -> Vec<String> {
        let mut t: Vec<String> = sentences.iter().map(|s| s.text.clone()).collect();
        t.sort();
        t
    }

    #[test]
    fn group_filter_keeps_only_tagged_sentences() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = PuzzleState::new();
        state.start_session("en", &corpus(), "short", &mut rng).unwrap();

        let session = state.session().unwrap();
        assert_eq!(session.pool().len(), 3);
        assert!(session.pool().iter().all(|s| s.groups.contains("short")));
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_complete());
    }

    #[test]
    fn random_group_is_a_permutation_of_everything() {
        let all = corpus();
        let mut orders = std::collections::HashSet::new();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = PuzzleState::new();
            state.start_session("en", &all, RANDOM_GROUP, &mut rng).unwrap();
            let pool = state.session().unwrap().pool();
            assert_eq!(texts(pool), texts(&all));
            orders.insert(pool.iter().map(|s| s.text.clone()).collect::<Vec<_>>());
        }
        assert!(orders.len() > 1, "pool order never changed");
    }

    #[test]
    fn empty_group_is_an_error_and_keeps_state() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = PuzzleState::new();
        state.start_session("en", &corpus(), "short", &mut rng).unwrap();

        let err = state.start_session("en", &corpus(), "poetry", &mut rng).unwrap_err();
        assert_eq!(err, PuzzleError::EmptyPool { group: "poetry".into() });
        assert_eq!(state.session().unwrap().group, "short");
    }

    #[test]
    fn round_is_a_shuffle_of_the_current_sentence() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = PuzzleState::new();
        state.start_session("en", &corpus(), "long", &mut rng).unwrap();
        assert!(state.start_round(&mut rng));

        let round = state.round().unwrap();
        let mut got: Vec<String> = round.shuffled_words().to_vec();
        let mut want = state.current_sentence().unwrap().words();
        got.sort();
        want.sort();
        assert_eq!(got, want);
        assert!(round.answer().is_empty());
    }

    #[test]
    fn advance_completes_after_last_sentence() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut state = PuzzleState::new();
        state.start_session("en", &corpus(), "negative", &mut rng).unwrap();
        state.start_round(&mut rng);

        assert!(!state.is_last_sentence());
        assert!(!state.advance());
        assert!(state.is_last_sentence());
        assert!(state.advance());
        assert!(state.session().unwrap().is_complete());
        assert_eq!(state.session().unwrap().current_index(), 2);
        assert!(state.current_sentence().is_none());

        // advancing past the end does nothing
        assert!(state.advance());
        assert_eq!(state.session().unwrap().current_index(), 2);
        assert!(!state.start_round(&mut rng));
        assert!(state.round().is_none());
    }

    #[test]
    fn restart_reshuffles_the_same_sentences() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = PuzzleState::new();
        state.start_session("en", &corpus(), RANDOM_GROUP, &mut rng).unwrap();
        while !state.advance() {}

        assert!(state.restart(&mut rng));
        let session = state.session().unwrap();
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_complete());
        assert_eq!(texts(session.pool()), texts(&corpus()));
        assert!(state.round().is_some());
    }

    #[test]
    fn restart_changes_the_order() {
        let all = corpus();
        let mut reordered = false;
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = PuzzleState::new();
            state.start_session("en", &all, RANDOM_GROUP, &mut rng).unwrap();
            let before = state.session().unwrap().pool().to_vec();

            state.restart(&mut rng);
            let after = state.session().unwrap().pool();
            assert_eq!(texts(after), texts(&before));
            reordered |= after != before.as_slice();
        }
        assert!(reordered, "restart kept the previous order for every seed");
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut round = Round::new(vec!["a".into(), "b".into(), "c".into(), "d".into()]);
        for w in ["d", "b", "a", "c"] {
            assert!(round.push_word(w));
        }
        assert_eq!(round.remove_at(1).as_deref(), Some("b"));
        assert_eq!(round.answer(), ["d", "a", "c"]);
        assert_eq!(round.remove_at(9), None);
        assert_eq!(round.answer().len(), 3);
    }

    #[test]
    fn push_refuses_exhausted_words() {
        let mut round = Round::new(vec!["the".into(), "cat".into(), "the".into()]);
        assert!(round.push_word("the"));
        assert!(round.push_word("the"));
        assert!(!round.push_word("the"));
        assert!(!round.push_word("dog"));
        assert_eq!(round.answer(), ["the", "the"]);
    }
}
