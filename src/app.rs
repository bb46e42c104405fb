use crate::config::Theme;
use crate::flow::{Cue, FlowController, GroupOption, Screen};
use crate::i18n::{self, Strings};
use crate::prefs::Preferences;
use crate::sound::SoundManager;
use crate::stats::Statistics;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Words,
    Answer,
}

pub struct App {
    pub should_quit: bool,
    pub flow: FlowController,
    pub theme: Theme,
    pub prefs: Preferences,
    pub stats: Statistics,
    pub sound: SoundManager,

    pub languages: Vec<String>,
    pub language_cursor: usize,
    pub group_cursor: usize,
    pub word_cursor: usize,
    pub answer_cursor: usize,
    pub focus: Focus,

    pub terminal_width: u16,

    prefs_path: Option<PathBuf>,
    stats_path: Option<PathBuf>,
}

impl App {
    pub fn new(
        flow: FlowController,
        theme: Theme,
        prefs: Preferences,
        stats: Statistics,
        prefs_path: Option<PathBuf>,
        stats_path: Option<PathBuf>,
    ) -> Self {
        let languages = flow.languages();
        let language_cursor = prefs
            .last_language
            .as_ref()
            .and_then(|l| languages.iter().position(|c| c == l))
            .unwrap_or(0);
        let sound = SoundManager::new(prefs.sound_enabled);

        Self {
            should_quit: false,
            flow,
            theme,
            prefs,
            stats,
            sound,
            languages,
            language_cursor,
            group_cursor: 0,
            word_cursor: 0,
            answer_cursor: 0,
            focus: Focus::Words,
            terminal_width: 80,
            prefs_path,
            stats_path,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn resize(&mut self, width: u16, _height: u16) {
        self.terminal_width = width;
    }

    /// Interface language: the loaded one, else the remembered one.
    pub fn ui_language(&self) -> &str {
        self.flow
            .language()
            .or(self.prefs.last_language.as_deref())
            .unwrap_or("en")
    }

    pub fn strings(&self) -> &'static Strings {
        i18n::strings(self.ui_language())
    }

    pub fn group_options(&self) -> Vec<GroupOption> {
        self.flow.group_options()
    }

    pub fn select_language(&mut self, code: &str) {
        let cue = self.flow.select_language(code);
        if self.flow.screen() == Screen::GroupSelect {
            self.prefs.last_language = self.flow.language().map(str::to_string);
            self.save_prefs();
            self.group_cursor = 0;
        }
        self.handle_cue(cue);
    }

    pub fn select_group(&mut self, key: &str) {
        let cue = self.flow.select_group(key);
        self.reset_cursors();
        self.handle_cue(cue);
    }

    pub fn change_language(&mut self) {
        let cue = self.flow.change_language();
        self.prefs.last_language = None;
        self.save_prefs();
        self.handle_cue(cue);
    }

    pub fn toggle_sound(&mut self) {
        self.prefs.sound_enabled = self.sound.toggle();
        self.save_prefs();
    }

    pub fn restart(&mut self) {
        let cue = self.flow.restart();
        self.reset_cursors();
        self.handle_cue(cue);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        match self.flow.screen() {
            Screen::LanguageSelect => self.on_language_key(key),
            Screen::GroupSelect => self.on_group_key(key),
            Screen::Playing => self.on_playing_key(key),
            Screen::Complete => self.on_complete_key(key),
        }
        self.clamp_cursors();
    }

    fn on_language_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.flow.dismiss_notice();
                self.language_cursor = self.language_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.flow.dismiss_notice();
                self.language_cursor += 1;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(code) = self.languages.get(self.language_cursor).cloned() {
                    self.select_language(&code);
                }
            }
            _ => {}
        }
    }

    fn on_group_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.flow.dismiss_notice();
                self.group_cursor = self.group_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.flow.dismiss_notice();
                self.group_cursor += 1;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(option) = self.group_options().get(self.group_cursor) {
                    let key = option.key.clone();
                    self.select_group(&key);
                }
            }
            KeyCode::Backspace | KeyCode::Left => self.change_language(),
            _ => {}
        }
    }

    fn on_playing_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let cue = match key.code {
            KeyCode::Char('r') if ctrl => self.flow.reset_round(),
            KeyCode::Char('s') if ctrl => {
                self.toggle_sound();
                Cue::None
            }
            KeyCode::Char('g') if ctrl => self.flow.back_to_groups(),
            KeyCode::Char('l') if ctrl => {
                self.change_language();
                Cue::None
            }
            KeyCode::Char('?') => self.flow.show_answer(),
            KeyCode::Left => {
                self.move_cursor(-1);
                Cue::None
            }
            KeyCode::Right => {
                self.move_cursor(1);
                Cue::None
            }
            KeyCode::Up => {
                if self.flow.round().is_some_and(|r| !r.answer().is_empty()) {
                    self.focus = Focus::Answer;
                }
                Cue::None
            }
            KeyCode::Down => {
                self.focus = Focus::Words;
                Cue::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            KeyCode::Backspace => {
                let last = self.flow.round().map_or(0, |r| r.answer().len());
                if last == 0 {
                    Cue::None
                } else {
                    self.flow.remove_word(last - 1)
                }
            }
            KeyCode::Delete => self.flow.remove_word(self.answer_cursor),
            _ => Cue::None,
        };
        if self.flow.screen() == Screen::Playing && self.flow.round().is_some_and(|r| r.answer().is_empty()) {
            self.focus = Focus::Words;
        }
        if self.flow.screen() != Screen::Playing {
            self.reset_cursors();
        }
        self.handle_cue(cue);
    }

    /// Enter: advance when solved, otherwise press the focused button.
    fn activate(&mut self) -> Cue {
        if self.flow.can_advance() {
            self.reset_cursors();
            return self.flow.next();
        }
        if self.flow.can_finish() {
            return self.flow.finish();
        }
        match self.focus {
            Focus::Words => {
                let cue = self.flow.add_word_at(self.word_cursor);
                if cue != Cue::None {
                    self.word_cursor = self.next_enabled_word(self.word_cursor);
                }
                cue
            }
            Focus::Answer => self.flow.remove_word(self.answer_cursor),
        }
    }

    fn on_complete_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.restart(),
            KeyCode::Char('g') => {
                let cue = self.flow.back_to_groups();
                self.handle_cue(cue);
            }
            KeyCode::Char('l') => self.change_language(),
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let (cursor, len) = match self.focus {
            Focus::Words => (&mut self.word_cursor, self.flow.round().map_or(0, |r| r.shuffled_words().len())),
            Focus::Answer => (&mut self.answer_cursor, self.flow.round().map_or(0, |r| r.answer().len())),
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        *cursor = (*cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    /// First enabled button after `from`, wrapping; `from` when none is left.
    fn next_enabled_word(&self, from: usize) -> usize {
        let Some(round) = self.flow.round() else {
            return 0;
        };
        let flags = round.availability();
        let len = flags.len();
        (1..=len)
            .map(|step| (from + step) % len)
            .find(|&i| flags[i])
            .unwrap_or(from)
    }

    fn reset_cursors(&mut self) {
        self.word_cursor = 0;
        self.answer_cursor = 0;
        self.focus = Focus::Words;
    }

    fn clamp_cursors(&mut self) {
        self.language_cursor = self.language_cursor.min(self.languages.len().saturating_sub(1));
        self.group_cursor = self.group_cursor.min(self.group_options().len().saturating_sub(1));
        if let Some(round) = self.flow.round() {
            self.word_cursor = self.word_cursor.min(round.shuffled_words().len().saturating_sub(1));
            self.answer_cursor = self.answer_cursor.min(round.answer().len().saturating_sub(1));
        }
    }

    fn handle_cue(&mut self, cue: Cue) {
        self.sound.play(cue);
        let language = self.ui_language().to_string();
        match cue {
            Cue::Correct { elapsed } => self.stats.record_answer(true, &language, elapsed.as_secs_f64()),
            Cue::Incorrect { elapsed } => self.stats.record_answer(false, &language, elapsed.as_secs_f64()),
            Cue::Complete => self.stats.record_game_complete(),
            Cue::Click | Cue::None => return,
        }
        self.save_stats();
    }

    fn save_prefs(&self) {
        if let Some(path) = &self.prefs_path {
            if let Err(e) = self.prefs.save_to(path) {
                warn!(error = %e, "could not save preferences");
            }
        }
    }

    fn save_stats(&self) {
        if let Some(path) = &self.stats_path {
            if let Err(e) = self.stats.save_to(path) {
                warn!(error = %e, "could not save statistics");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::EmbeddedRepository;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn app() -> App {
        let flow = FlowController::new(Box::new(EmbeddedRepository), "en", StdRng::seed_from_u64(9));
        App::new(
            flow,
            Theme::default(),
            Preferences::default(),
            Statistics::default(),
            None,
            None,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        app.on_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    /// Presses the word buttons in canonical order.
    fn solve_with_keys(app: &mut App) {
        let canonical = app.flow.session().unwrap().current_sentence().unwrap().words();
        for word in canonical {
            let round = app.flow.round().unwrap();
            let flags = round.availability();
            let pos = round
                .shuffled_words()
                .iter()
                .enumerate()
                .position(|(i, w)| *w == word && flags[i])
                .unwrap();
            app.word_cursor = pos;
            press(app, KeyCode::Enter);
        }
    }

    #[test]
    fn keys_drive_a_full_session() {
        let mut app = app();
        let en = app.languages.iter().position(|l| l == "en").unwrap();
        app.language_cursor = en;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.flow.screen(), Screen::GroupSelect);
        assert_eq!(app.prefs.last_language.as_deref(), Some("en"));

        let short = app.group_options().iter().position(|g| g.key == "short").unwrap();
        app.group_cursor = short;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.flow.screen(), Screen::Playing);

        let total = app.flow.session().unwrap().pool().len();
        for _ in 0..total {
            solve_with_keys(&mut app);
            assert!(app.flow.verdict().is_some_and(|v| v.is_correct()));
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.flow.screen(), Screen::Complete);
        assert_eq!(app.stats.correct_answers, total as u64);
        assert_eq!(app.stats.total_games, 1);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.flow.screen(), Screen::Playing);
        assert_eq!(app.flow.session().unwrap().current_index(), 0);
    }

    #[test]
    fn backspace_and_reset_edit_the_answer() {
        let mut app = app();
        app.select_language("en");
        app.select_group("medium");

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.flow.round().unwrap().answer().len(), 2);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.flow.round().unwrap().answer().len(), 1);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.focus, Focus::Answer);
        press(&mut app, KeyCode::Enter);
        assert!(app.flow.round().unwrap().answer().is_empty());
        assert_eq!(app.focus, Focus::Words);

        press(&mut app, KeyCode::Enter);
        ctrl(&mut app, 'r');
        assert!(app.flow.round().unwrap().answer().is_empty());
    }

    #[test]
    fn wrong_answer_is_recorded_in_stats() {
        let mut app = app();
        app.select_language("en");
        app.select_group("short");

        // press every button left to right until the row is used up
        while !app.flow.round().unwrap().is_complete() {
            app.word_cursor = app.flow.round().unwrap().availability().iter().position(|f| *f).unwrap();
            press(&mut app, KeyCode::Enter);
        }
        let verdict = app.flow.verdict().unwrap();
        assert_eq!(app.stats.total_sentences, 1);
        assert_eq!(app.stats.correct_answers, u64::from(verdict.is_correct()));
    }

    #[test]
    fn change_language_forgets_the_preference() {
        let mut app = app();
        app.select_language("ru");
        assert_eq!(app.prefs.last_language.as_deref(), Some("ru"));
        assert_eq!(app.strings().correct, i18n::strings("ru").correct);

        app.select_group("random");
        ctrl(&mut app, 'l');
        assert_eq!(app.flow.screen(), Screen::LanguageSelect);
        assert_eq!(app.prefs.last_language, None);
    }

    #[test]
    fn sound_toggle_is_remembered() {
        let mut app = app();
        app.select_language("en");
        app.select_group("random");
        ctrl(&mut app, 's');
        assert!(app.sound.enabled);
        assert!(app.prefs.sound_enabled);
        ctrl(&mut app, 's');
        assert!(!app.prefs.sound_enabled);
    }

    #[test]
    fn cursor_wraps_around_the_row() {
        let mut app = app();
        app.select_language("en");
        app.select_group("short");
        let len = app.flow.round().unwrap().shuffled_words().len();

        press(&mut app, KeyCode::Left);
        assert_eq!(app.word_cursor, len - 1);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.word_cursor, 0);
    }
}
