use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::terminal as term;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct LanguageStats {
    pub played: u64,
    pub correct: u64,
}

/// Answer statistics across all sessions.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Statistics {
    /// ISO 8601 UTC timestamp of the last change
    pub updated_at: Option<String>,
    pub total_games: u64,
    pub total_sentences: u64,
    pub correct_answers: u64,
    pub incorrect_answers: u64,
    /// seconds per correct answer
    pub average_time: f64,
    pub best_time: Option<f64>,
    pub current_streak: u64,
    pub best_streak: u64,
    pub languages: BTreeMap<String, LanguageStats>,
}

pub fn stats_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "senta").map(|dirs| dirs.data_local_dir().join("stats.json"))
}

impl Statistics {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let stats = serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        Ok(stats)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // create the data directory if it doesn't exist yet
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn record_answer(&mut self, correct: bool, language: &str, secs: f64) {
        self.total_sentences += 1;
        let lang = self.languages.entry(language.to_string()).or_default();
        lang.played += 1;

        if !correct {
            self.incorrect_answers += 1;
            self.current_streak = 0;
            self.touch();
            return;
        }

        self.correct_answers += 1;
        lang.correct += 1;
        self.current_streak += 1;
        self.best_streak = self.best_streak.max(self.current_streak);

        // running mean over solve times of correct answers
        let n = self.correct_answers as f64;
        self.average_time = (self.average_time * (n - 1.0) + secs) / n;

        if self.best_time.map_or(true, |best| secs < best) {
            self.best_time = Some(secs);
        }
        self.touch();
    }

    pub fn record_game_complete(&mut self) {
        self.total_games += 1;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now().to_rfc3339());
    }

    /// Whole percent of correct answers, 0 without data.
    pub fn accuracy(&self) -> u32 {
        percent(self.correct_answers, self.total_sentences)
    }

    pub fn language_accuracy(&self, language: &str) -> u32 {
        self.languages
            .get(language)
            .map_or(0, |l| percent(l.correct, l.played))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
        self.touch();
    }
}

fn percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

pub fn show_stats(stats: &Statistics) {
    if stats.total_sentences == 0 {
        println!("\n  No statistics yet. Solve a sentence to start tracking your progress.\n");
        return;
    }

    let term_width = term::size()
        .map(|(w, _)| w as usize)
        .unwrap_or(80)
        .max(40);

    const W_LANG: usize = 14;
    const W_PLAYED: usize = 9;
    const W_CORRECT: usize = 9;
    const W_ACC: usize = 6;

    let divider = "-".repeat((1 + W_LANG + W_PLAYED + W_CORRECT + W_ACC).min(term_width));

    println!();
    println!(
        "  {} games  |  {} answers  |  accuracy {}%  |  streak {} (best {})",
        stats.total_games,
        stats.total_sentences,
        stats.accuracy(),
        stats.current_streak,
        stats.best_streak
    );
    let best = stats
        .best_time
        .map(|t| format!("{:.1}s", t))
        .unwrap_or_else(|| "-".to_string());
    println!("  avg time {:.1}s  |  best time {}", stats.average_time, best);
    println!();

    println!(
        " {:<lw$}{:<pw$}{:<cw$}{}",
        "language",
        "played",
        "correct",
        "acc",
        lw = W_LANG,
        pw = W_PLAYED,
        cw = W_CORRECT
    );
    println!(" {}", divider);
    for (code, lang) in &stats.languages {
        println!(
            " {:<lw$}{:<pw$}{:<cw$}{}%",
            code,
            lang.played,
            lang.correct,
            stats.language_accuracy(code),
            lw = W_LANG,
            pw = W_PLAYED,
            cw = W_CORRECT
        );
    }
    println!(" {}", divider);
    if let Some(updated) = stats.updated_at.as_deref() {
        println!("  last played {}", updated.get(..10).unwrap_or(updated));
    }
    println!();
}
