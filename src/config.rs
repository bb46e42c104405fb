use anyhow::Result;
use config::{Config, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Theme {
    pub bg: String,      // background
    pub main: String,    // brand color, focused button
    pub text: String,    // word buttons and answer
    pub sub: String,     // used-up buttons, hints
    #[serde(alias = "subAlt", alias = "subalt")]
    pub sub_alt: String, // borders, footer
    pub error: String,   // incorrect answer
    pub success: String, // correct answer
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: "#2c2e34".to_string(),
            main: "#2aabee".to_string(),
            text: "#d1d0c5".to_string(),
            sub: "#646669".to_string(),
            sub_alt: "#45474d".to_string(),
            error: "#e01d1d".to_string(),
            success: "#128c7e".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub theme: Theme,
    /// retried once when the chosen language fails to load
    pub fallback_language: String,
    /// directory of `<code>.json` sentence files that override the built-in ones
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            fallback_language: "en".to_string(),
            data_dir: None,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "senta").map(|dirs| dirs.config_dir().join("config.toml"))
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    pub fn load_from(path: Option<PathBuf>) -> Result<Self> {
        let defaults = AppConfig::default();
        let theme = defaults.theme;

        // no builder default for subAlt: Theme falls back to its own default
        let mut builder = Config::builder()
            .set_default("theme.bg", theme.bg)?
            .set_default("theme.main", theme.main)?
            .set_default("theme.text", theme.text)?
            .set_default("theme.sub", theme.sub)?
            .set_default("theme.error", theme.error)?
            .set_default("theme.success", theme.success)?
            .set_default("fallback_language", defaults.fallback_language)?;

        if let Some(config_path) = path {
            if config_path.exists() {
                builder = builder.add_source(File::from(config_path));
            }
        }

        let cfg = builder.build()?;
        let app_config: AppConfig = cfg.try_deserialize()?;
        Ok(app_config)
    }
}
