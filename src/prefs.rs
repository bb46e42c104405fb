use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Remembered between runs: the last language picked and whether sound is on.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Preferences {
    pub last_language: Option<String>,
    pub sound_enabled: bool,
}

pub fn prefs_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "senta").map(|dirs| dirs.data_local_dir().join("prefs.json"))
}

impl Preferences {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let prefs = serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        Ok(prefs)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load_from(&dir.path().join("prefs.json")).unwrap();
        assert_eq!(prefs.last_language, None);
        assert!(!prefs.sound_enabled);
    }

    #[test]
    fn saves_and_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("senta").join("prefs.json");
        let prefs = Preferences {
            last_language: Some("ru".into()),
            sound_enabled: true,
        };
        prefs.save_to(&path).unwrap();
        assert_eq!(Preferences::load_from(&path).unwrap(), prefs);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{ "sound_enabled": true }"#).unwrap();
        let prefs = Preferences::load_from(&path).unwrap();
        assert!(prefs.sound_enabled);
        assert_eq!(prefs.last_language, None);
    }
}
