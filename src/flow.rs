//! Screen state machine: language → group → playing → complete.
//!
//! Every gesture handler runs to completion and returns a [`Cue`] for the
//! presentation layer. Gestures that make no sense in the current screen are
//! ignored rather than treated as errors.

use crate::models::{Group, SentenceSet, RANDOM_GROUP};
use crate::puzzle::{PuzzleError, PuzzleState, Round, Session, Verdict};
use crate::repository::SentenceRepository;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    LanguageSelect,
    GroupSelect,
    Playing,
    Complete,
}

/// What the presentation layer should react to after a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    None,
    Click,
    Correct { elapsed: Duration },
    Incorrect { elapsed: Duration },
    Complete,
}

/// The message line under the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    None,
    Correct,
    Incorrect,
    Answer(String),
}

/// Non-blocking message shown on top of the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    FellBack { failed: String, fallback: String },
    LoadFailed { language: String },
    EmptyGroup { group: String },
}

/// A group as offered in the menu, with its pool size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOption {
    pub key: String,
    pub description: Option<String>,
    pub count: usize,
}

pub struct FlowController {
    repository: Box<dyn SentenceRepository>,
    fallback_language: String,
    rng: StdRng,
    screen: Screen,
    sentence_set: Option<SentenceSet>,
    puzzle: PuzzleState,
    verdict: Option<Verdict>,
    peek: bool,
    notice: Option<Notice>,
}

impl FlowController {
    pub fn new(repository: Box<dyn SentenceRepository>, fallback_language: impl Into<String>, rng: StdRng) -> Self {
        Self {
            repository,
            fallback_language: fallback_language.into(),
            rng,
            screen: Screen::LanguageSelect,
            sentence_set: None,
            puzzle: PuzzleState::new(),
            verdict: None,
            peek: false,
            notice: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn languages(&self) -> Vec<String> {
        self.repository.languages()
    }

    /// Code of the loaded language, which may be the fallback.
    pub fn language(&self) -> Option<&str> {
        self.sentence_set.as_ref().map(|s| s.language.as_str())
    }

    pub fn language_name(&self) -> Option<String> {
        self.sentence_set.as_ref().map(SentenceSet::display_name)
    }

    pub fn session(&self) -> Option<&Session> {
        self.puzzle.session()
    }

    pub fn round(&self) -> Option<&Round> {
        self.puzzle.round()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn feedback(&self) -> Feedback {
        if self.peek {
            if let Some(sentence) = self.puzzle.current_sentence() {
                return Feedback::Answer(sentence.text.clone());
            }
        }
        match self.verdict {
            Some(Verdict::Correct) => Feedback::Correct,
            Some(Verdict::Incorrect) => Feedback::Incorrect,
            None => Feedback::None,
        }
    }

    /// "random" first, then every group that has at least one sentence.
    pub fn group_options(&self) -> Vec<GroupOption> {
        let Some(set) = &self.sentence_set else {
            return Vec::new();
        };
        let mut options = vec![GroupOption {
            key: RANDOM_GROUP.to_string(),
            description: None,
            count: set.sentences.len(),
        }];
        options.extend(set.playable_groups().into_iter().map(|g: &Group| GroupOption {
            key: g.key.clone(),
            description: Some(g.description.clone()),
            count: set.count_in_group(&g.key),
        }));
        options
    }

    /// Next is offered only after a correct answer that is not the last one.
    pub fn can_advance(&self) -> bool {
        self.screen == Screen::Playing && self.is_solved() && !self.puzzle.is_last_sentence()
    }

    /// The last sentence is solved; the session can be finished.
    pub fn can_finish(&self) -> bool {
        self.screen == Screen::Playing && self.is_solved() && self.puzzle.is_last_sentence()
    }

    fn is_solved(&self) -> bool {
        self.verdict.is_some_and(Verdict::is_correct)
    }

    fn clear_feedback(&mut self) {
        self.verdict = None;
        self.peek = false;
    }

    pub fn select_language(&mut self, code: &str) -> Cue {
        self.notice = None;
        match self.repository.load(code) {
            Ok(set) => {
                info!(language = code, "sentences loaded");
                self.enter_groups(set);
            }
            Err(err) => {
                warn!(language = code, error = %err, "failed to load sentences");
                if code == self.fallback_language {
                    self.fail_load(code);
                    return Cue::None;
                }
                let fallback = self.fallback_language.clone();
                match self.repository.load(&fallback) {
                    Ok(set) => {
                        info!(language = %fallback, "fell back to default language");
                        self.enter_groups(set);
                        self.notice = Some(Notice::FellBack {
                            failed: code.to_string(),
                            fallback,
                        });
                    }
                    Err(err) => {
                        warn!(language = %fallback, error = %err, "fallback language failed too");
                        self.fail_load(code);
                        return Cue::None;
                    }
                }
            }
        }
        Cue::Click
    }

    fn enter_groups(&mut self, set: SentenceSet) {
        self.puzzle.clear();
        self.clear_feedback();
        self.sentence_set = Some(set);
        self.screen = Screen::GroupSelect;
    }

    fn fail_load(&mut self, code: &str) {
        self.notice = Some(Notice::LoadFailed {
            language: code.to_string(),
        });
        self.screen = Screen::LanguageSelect;
    }

    pub fn select_group(&mut self, key: &str) -> Cue {
        if self.screen != Screen::GroupSelect {
            return Cue::None;
        }
        let Some(set) = &self.sentence_set else {
            return Cue::None;
        };
        match self
            .puzzle
            .start_session(&set.language, &set.sentences, key, &mut self.rng)
        {
            Ok(()) => {
                self.notice = None;
                self.clear_feedback();
                self.puzzle.start_round(&mut self.rng);
                self.screen = Screen::Playing;
                Cue::Click
            }
            Err(PuzzleError::EmptyPool { group }) => {
                warn!(group = %group, "selected group is empty");
                self.notice = Some(Notice::EmptyGroup { group });
                Cue::None
            }
        }
    }

    pub fn add_word(&mut self, word: &str) -> Cue {
        if self.screen != Screen::Playing {
            return Cue::None;
        }
        let Some(round) = self.puzzle.round_mut() else {
            return Cue::None;
        };
        if !round.push_word(word) {
            return Cue::None;
        }
        if !round.is_complete() {
            return Cue::Click;
        }
        let elapsed = round.elapsed();
        let Some(canonical) = self.puzzle.current_sentence().map(|s| s.text.clone()) else {
            return Cue::Click;
        };
        let verdict = self.puzzle.round().and_then(|r| r.evaluate(&canonical));
        self.peek = false;
        self.verdict = verdict;
        debug!(?verdict, "answer evaluated");
        match verdict {
            Some(Verdict::Correct) => Cue::Correct { elapsed },
            Some(Verdict::Incorrect) => Cue::Incorrect { elapsed },
            None => Cue::Click,
        }
    }

    /// Adds the word at `position` of the shuffled row, if that button is enabled.
    pub fn add_word_at(&mut self, position: usize) -> Cue {
        let Some(round) = self.puzzle.round() else {
            return Cue::None;
        };
        let enabled = round.availability().get(position).copied().unwrap_or(false);
        if !enabled {
            return Cue::None;
        }
        let word = round.shuffled_words()[position].clone();
        self.add_word(&word)
    }

    pub fn remove_word(&mut self, position: usize) -> Cue {
        if self.screen != Screen::Playing {
            return Cue::None;
        }
        let Some(round) = self.puzzle.round_mut() else {
            return Cue::None;
        };
        if round.remove_at(position).is_none() {
            return Cue::None;
        }
        self.clear_feedback();
        Cue::Click
    }

    pub fn next(&mut self) -> Cue {
        if !self.can_advance() {
            return Cue::None;
        }
        self.step()
    }

    /// Leaves the last solved sentence for the completion screen.
    pub fn finish(&mut self) -> Cue {
        if !self.can_finish() {
            return Cue::None;
        }
        self.step()
    }

    fn step(&mut self) -> Cue {
        self.clear_feedback();
        if self.puzzle.advance() {
            info!("session complete");
            self.screen = Screen::Complete;
            return Cue::Complete;
        }
        self.puzzle.start_round(&mut self.rng);
        Cue::Click
    }

    pub fn restart(&mut self) -> Cue {
        if !matches!(self.screen, Screen::Playing | Screen::Complete) {
            return Cue::None;
        }
        if !self.puzzle.restart(&mut self.rng) {
            return Cue::None;
        }
        self.clear_feedback();
        self.screen = Screen::Playing;
        Cue::Click
    }

    /// Toggles a read-only peek at the expected sentence.
    pub fn show_answer(&mut self) -> Cue {
        if self.screen != Screen::Playing || self.puzzle.current_sentence().is_none() {
            return Cue::None;
        }
        self.peek = !self.peek;
        Cue::Click
    }

    pub fn reset_round(&mut self) -> Cue {
        if self.screen != Screen::Playing {
            return Cue::None;
        }
        let Some(round) = self.puzzle.round_mut() else {
            return Cue::None;
        };
        round.clear();
        self.clear_feedback();
        Cue::Click
    }

    pub fn change_language(&mut self) -> Cue {
        self.puzzle.clear();
        self.clear_feedback();
        self.sentence_set = None;
        self.notice = None;
        self.screen = Screen::LanguageSelect;
        Cue::Click
    }

    pub fn back_to_groups(&mut self) -> Cue {
        if self.sentence_set.is_none() || !matches!(self.screen, Screen::Playing | Screen::Complete) {
            return Cue::None;
        }
        self.puzzle.clear();
        self.clear_feedback();
        self.screen = Screen::GroupSelect;
        Cue::Click
    }
}
