use crate::models::{SentenceFile, SentenceSet};
use rust_embed::RustEmbed;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

#[derive(RustEmbed)]
#[folder = "resources/"]
struct Asset;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no sentence file for language `{language}`")]
    NotFound { language: String },
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("sentence file for `{language}` is malformed: {source}")]
    Parse {
        language: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("sentence file for `{language}` has no sentences")]
    Empty { language: String },
}

/// Where sentences come from. Loaded once per language selection.
pub trait SentenceRepository {
    fn load(&self, language: &str) -> Result<SentenceSet, LoadError>;

    /// Language codes this source can serve, sorted.
    fn languages(&self) -> Vec<String>;
}

pub fn parse(language: &str, bytes: &[u8]) -> Result<SentenceSet, LoadError> {
    let file: SentenceFile = serde_json::from_slice(bytes).map_err(|source| LoadError::Parse {
        language: language.to_string(),
        source,
    })?;
    let set = file.into_set(language);
    if set.sentences.is_empty() {
        return Err(LoadError::Empty {
            language: language.to_string(),
        });
    }
    debug!(
        language,
        sentences = set.sentences.len(),
        groups = set.groups.len(),
        "sentence set parsed"
    );
    Ok(set)
}

fn sentence_filename(language: &str) -> String {
    format!("sentences/{}.json", language)
}

fn is_language_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Sentence files compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedRepository;

impl SentenceRepository for EmbeddedRepository {
    fn load(&self, language: &str) -> Result<SentenceSet, LoadError> {
        let file = Asset::get(&sentence_filename(language)).ok_or_else(|| LoadError::NotFound {
            language: language.to_string(),
        })?;
        parse(language, file.data.as_ref())
    }

    fn languages(&self) -> Vec<String> {
        let mut codes: Vec<String> = Asset::iter()
            .filter_map(|path| {
                path.strip_prefix("sentences/")
                    .and_then(|p| p.strip_suffix(".json"))
                    .map(str::to_string)
            })
            .collect();
        codes.sort();
        codes
    }
}

/// `<root>/<code>.json` files on disk.
#[derive(Debug, Clone)]
pub struct DirRepository {
    root: PathBuf,
}

impl DirRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SentenceRepository for DirRepository {
    fn load(&self, language: &str) -> Result<SentenceSet, LoadError> {
        if !is_language_code(language) {
            return Err(LoadError::NotFound {
                language: language.to_string(),
            });
        }
        let path = self.root.join(format!("{}.json", language));
        let bytes = fs::read(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                LoadError::NotFound {
                    language: language.to_string(),
                }
            } else {
                LoadError::Io { path: path.clone(), source }
            }
        })?;
        info!(path = %path.display(), "loading sentences from data dir");
        parse(language, &bytes)
    }

    fn languages(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };
        let mut codes: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let path = e.path();
                if path.extension().and_then(|x| x.to_str()) != Some("json") {
                    return None;
                }
                path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
            })
            .filter(|code| is_language_code(code))
            .collect();
        codes.sort();
        codes
    }
}

/// A data directory that overrides the embedded pack file by file.
pub struct LayeredRepository {
    primary: DirRepository,
    fallback: EmbeddedRepository,
}

impl LayeredRepository {
    pub fn new(primary: DirRepository) -> Self {
        Self {
            primary,
            fallback: EmbeddedRepository,
        }
    }
}

impl SentenceRepository for LayeredRepository {
    fn load(&self, language: &str) -> Result<SentenceSet, LoadError> {
        match self.primary.load(language) {
            Err(LoadError::NotFound { .. }) => self.fallback.load(language),
            other => other,
        }
    }

    fn languages(&self) -> Vec<String> {
        let mut codes = self.fallback.languages();
        codes.extend(self.primary.languages());
        codes.sort();
        codes.dedup();
        codes
    }
}
