use crate::i18n;
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::BTreeSet;

/// Sentinel group key meaning "every sentence of the language".
pub const RANDOM_GROUP: &str = "random";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    pub groups: BTreeSet<String>,
}

impl Sentence {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            groups: BTreeSet::new(),
        }
    }

    pub fn with_groups<I, S>(text: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    pub fn in_group(&self, key: &str) -> bool {
        key == RANDOM_GROUP || self.groups.contains(key)
    }

    /// Tokens exactly as they are joined back for evaluation: split on single spaces.
    pub fn words(&self) -> Vec<String> {
        self.text.split(' ').map(str::to_string).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: String,
    pub description: String,
}

/// Everything loaded for one language.
#[derive(Debug, Clone, Default)]
pub struct SentenceSet {
    pub language: String,
    pub name: Option<String>,
    pub sentences: Vec<Sentence>,
    pub groups: Vec<Group>,
}

impl SentenceSet {
    /// The file's own `name`, else the built-in name for the code.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => i18n::language_name(&self.language),
        }
    }

    pub fn count_in_group(&self, key: &str) -> usize {
        self.sentences.iter().filter(|s| s.in_group(key)).count()
    }

    /// Groups that would produce a non-empty pool, in file order.
    pub fn playable_groups(&self) -> Vec<&Group> {
        self.groups
            .iter()
            .filter(|g| self.count_in_group(&g.key) > 0)
            .collect()
    }
}

// on-disk shapes

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SentenceFile {
    Grouped {
        #[serde(default)]
        name: Option<String>,
        sentences: Vec<SentenceEntry>,
        #[serde(default)]
        groups: IndexMap<String, GroupEntry>,
    },
    // legacy variant: a bare list of strings, no grouping
    Plain(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SentenceEntry {
    Tagged {
        text: String,
        #[serde(default)]
        groups: Vec<String>,
    },
    Bare(String),
}

#[derive(Debug, Deserialize, Default)]
pub struct GroupEntry {
    #[serde(default)]
    pub description: String,
}

impl SentenceFile {
    pub fn into_set(self, language: &str) -> SentenceSet {
        let (name, sentences, groups) = match self {
            SentenceFile::Grouped {
                name,
                sentences,
                groups,
            } => {
                let sentences = sentences
                    .into_iter()
                    .map(|entry| match entry {
                        SentenceEntry::Tagged { text, groups } => Sentence::with_groups(text, groups),
                        SentenceEntry::Bare(text) => Sentence::new(text),
                    })
                    .collect::<Vec<_>>();
                let groups = groups
                    .into_iter()
                    // "random" is implicit and always offered first
                    .filter(|(key, _)| key != RANDOM_GROUP)
                    .map(|(key, entry)| Group {
                        description: if entry.description.is_empty() {
                            key.clone()
                        } else {
                            entry.description
                        },
                        key,
                    })
                    .collect();
                (name, sentences, groups)
            }
            SentenceFile::Plain(texts) => (None, texts.into_iter().map(Sentence::new).collect(), Vec::new()),
        };

        SentenceSet {
            language: language.to_string(),
            name,
            sentences: sentences
                .into_iter()
                .filter(|s| !s.text.trim().is_empty())
                .collect(),
            groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grouped_file_in_declaration_order() {
        let json = r#"{
            "sentences": [
                { "text": "I am here", "groups": ["short", "affirmative"] },
                { "text": "Are you ready", "groups": ["short"] },
                "No tags at all"
            ],
            "groups": {
                "short": { "description": "Short sentences" },
                "affirmative": { "description": "Affirmative sentences" },
                "negative": { "description": "Negative sentences" }
            }
        }"#;
        let file: SentenceFile = serde_json::from_str(json).unwrap();
        let set = file.into_set("en");

        assert_eq!(set.sentences.len(), 3);
        let keys: Vec<&str> = set.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["short", "affirmative", "negative"]);
        assert_eq!(set.count_in_group("short"), 2);
        assert_eq!(set.count_in_group(RANDOM_GROUP), 3);

        let playable: Vec<&str> = set.playable_groups().iter().map(|g| g.key.as_str()).collect();
        assert_eq!(playable, ["short", "affirmative"]);
    }

    #[test]
    fn parses_legacy_plain_list() {
        let file: SentenceFile = serde_json::from_str(r#"["the cat sat", "", "a dog ran"]"#).unwrap();
        let set = file.into_set("en");

        assert_eq!(set.sentences.len(), 2);
        assert!(set.groups.is_empty());
        assert!(set.sentences.iter().all(|s| s.in_group(RANDOM_GROUP)));
    }

    #[test]
    fn missing_description_falls_back_to_key() {
        let json = r#"{ "sentences": [{ "text": "a b", "groups": ["x"] }], "groups": { "x": {} } }"#;
        let set = serde_json::from_str::<SentenceFile>(json).unwrap().into_set("en");
        assert_eq!(set.groups[0].description, "x");
    }

    #[test]
    fn display_name_prefers_the_file_name() {
        let named = r#"{ "name": "British English", "sentences": ["a b"] }"#;
        let set = serde_json::from_str::<SentenceFile>(named).unwrap().into_set("en");
        assert_eq!(set.display_name(), "British English");

        let plain = serde_json::from_str::<SentenceFile>(r#"["a b"]"#).unwrap().into_set("en");
        assert_eq!(plain.display_name(), "English");

        let blank = r#"{ "name": "  ", "sentences": ["a b"] }"#;
        let set = serde_json::from_str::<SentenceFile>(blank).unwrap().into_set("pt");
        assert_eq!(set.display_name(), "PT");
    }

    #[test]
    fn double_space_leaves_an_empty_token() {
        let s = Sentence::new("wait  here");
        assert_eq!(s.words(), ["wait", "", "here"]);
    }

    #[test]
    fn words_keep_punctuation_and_duplicates() {
        let s = Sentence::new("the cat sat on the mat.");
        assert_eq!(s.words(), ["the", "cat", "sat", "on", "the", "mat."]);
    }
}
