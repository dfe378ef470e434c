use std::collections::HashMap;

use crate::api::error::ConfigurationError;
use crate::assets::manifest::WordManifest;

/// Category every other category falls back to when its word list is empty.
pub const ALPHABET: &str = "alphabet";

/// Last-resort vocabulary when even the alphabet category is empty.
pub const FALLBACK_ALPHABET: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M",
    "N", "O", "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z",
];

/// Source of challenge words, demonstration videos and label normalization.
pub trait WordSource {
    /// All category keys, in a stable order.
    fn categories(&self) -> Vec<String>;

    /// Ordered words of a category. Empty for unknown categories.
    fn words_for(&self, category: &str) -> Vec<String>;

    /// Opaque locator of the demonstration video for a word.
    fn video_ref(&self, word: &str, category: &str) -> String;

    /// Map a raw recognizer label onto the canonical word vocabulary.
    fn normalize(&self, raw_label: &str) -> String;
}

/// Case-insensitive exact comparison of two already-normalized labels.
pub fn labels_match(detected: &str, expected: &str) -> bool {
    detected.trim().eq_ignore_ascii_case(expected.trim())
}

/// Words for `category`, falling back to the alphabet category and then, if allowed,
/// to the built-in A–Z list. Returns the category the words actually belong to.
pub fn resolve_words(
    source: &dyn WordSource,
    category: &str,
    hardcoded_fallback: bool,
) -> Result<(String, Vec<String>), ConfigurationError> {
    let words = source.words_for(category);
    if !words.is_empty() {
        return Ok((category.to_string(), words));
    }

    log::warn!("category `{}` has no words, falling back to `{}`", category, ALPHABET);
    let words = source.words_for(ALPHABET);
    if !words.is_empty() {
        return Ok((ALPHABET.to_string(), words));
    }

    if hardcoded_fallback {
        return Ok((
            ALPHABET.to_string(),
            FALLBACK_ALPHABET.iter().map(|w| w.to_string()).collect(),
        ));
    }

    Err(ConfigurationError::NoWords {
        category: category.to_string(),
    })
}

/// In-memory word source built from a `WordManifest`.
#[derive(Debug, Clone)]
pub struct WordBank {
    categories: Vec<(String, Vec<String>)>,
    videos: HashMap<String, String>,
    /// Keys are lowercased raw labels.
    aliases: HashMap<String, String>,
    video_root: String,
}

impl WordBank {
    pub fn from_manifest(manifest: &WordManifest) -> Self {
        Self {
            categories: manifest
                .categories
                .iter()
                .map(|(key, words)| {
                    let words = words
                        .iter()
                        .map(|w| w.trim())
                        .filter(|w| !w.is_empty())
                        .map(str::to_string)
                        .collect();
                    (key.clone(), words)
                })
                .collect(),
            videos: manifest.videos.clone(),
            aliases: manifest
                .aliases
                .iter()
                .map(|(raw, canonical)| (raw.trim().to_lowercase(), canonical.clone()))
                .collect(),
            video_root: manifest.video_root.trim_end_matches('/').to_string(),
        }
    }

    /// Parse a manifest JSON string straight into a bank.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        WordManifest::from_json(json).map(|m| Self::from_manifest(&m))
    }

    /// The vocabulary shipped with the site: the alphabet plus a few starter sets.
    pub fn builtin() -> Self {
        let mut manifest = WordManifest {
            video_root: "videos".to_string(),
            ..WordManifest::default()
        };
        manifest.categories.insert(
            ALPHABET.to_string(),
            FALLBACK_ALPHABET.iter().map(|w| w.to_string()).collect(),
        );
        manifest.categories.insert(
            "greetings".to_string(),
            ["Hello", "Thank You", "Please", "Sorry", "Yes", "No"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
        );
        manifest.categories.insert(
            "numbers".to_string(),
            ["One", "Two", "Three", "Four", "Five"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
        );
        manifest
            .aliases
            .insert("thank_you".to_string(), "Thank You".to_string());
        Self::from_manifest(&manifest)
    }

    /// An empty bank. Every lookup falls back.
    pub fn empty() -> Self {
        Self::from_manifest(&WordManifest::default())
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WordSource for WordBank {
    fn categories(&self) -> Vec<String> {
        self.categories.iter().map(|(key, _)| key.clone()).collect()
    }

    fn words_for(&self, category: &str) -> Vec<String> {
        self.categories
            .iter()
            .find(|(key, _)| key == category)
            .map(|(_, words)| words.clone())
            .unwrap_or_default()
    }

    fn video_ref(&self, word: &str, category: &str) -> String {
        if let Some(video) = self.videos.get(&WordManifest::video_key(word, category)) {
            return video.clone();
        }
        format!(
            "{}/{}/{}.mp4",
            self.video_root,
            category,
            word.replace(' ', "_").to_lowercase()
        )
    }

    fn normalize(&self, raw_label: &str) -> String {
        let trimmed = raw_label.trim();
        match self.aliases.get(&trimmed.to_lowercase()) {
            Some(canonical) => canonical.clone(),
            None => trimmed.replace('_', " "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_alphabet() {
        let bank = WordBank::builtin();
        assert_eq!(bank.words_for(ALPHABET).len(), 26);
        assert!(bank.categories().contains(&"greetings".to_string()));
        assert!(bank.words_for("unknown").is_empty());
    }

    #[test]
    fn video_ref_prefers_explicit_entry() {
        let json = r#"{
            "categories": { "greetings": ["Hello", "Thank You"] },
            "videos": { "greetings/Hello": "cdn/hello.webm" },
            "video_root": "media/"
        }"#;
        let bank = WordBank::from_json(json).unwrap();
        assert_eq!(bank.video_ref("Hello", "greetings"), "cdn/hello.webm");
        assert_eq!(bank.video_ref("Thank You", "greetings"), "media/greetings/thank_you.mp4");
    }

    #[test]
    fn normalize_uses_aliases_then_underscores() {
        let bank = WordBank::builtin();
        assert_eq!(bank.normalize("THANK_YOU"), "Thank You");
        assert_eq!(bank.normalize(" good_morning "), "good morning");
        assert_eq!(bank.normalize("A"), "A");
    }

    #[test]
    fn labels_match_ignores_case_only() {
        assert!(labels_match("hello", "Hello"));
        assert!(labels_match("Thank You", "thank you"));
        assert!(!labels_match("Hell", "Hello"));
        assert!(labels_match(" A ", "a"));
    }

    #[test]
    fn blank_words_are_dropped() {
        let bank = WordBank::from_json(r#"{ "categories": { "colors": ["Red", "  ", ""] } }"#).unwrap();
        assert_eq!(bank.words_for("colors"), vec!["Red"]);
    }

    #[test]
    fn resolve_falls_back_to_alphabet() {
        let bank = WordBank::from_json(
            r#"{ "categories": { "colors": [], "alphabet": ["A", "B"] } }"#,
        )
        .unwrap();
        let (category, words) = resolve_words(&bank, "colors", false).unwrap();
        assert_eq!(category, ALPHABET);
        assert_eq!(words, vec!["A", "B"]);
    }

    #[test]
    fn resolve_uses_hardcoded_list_last() {
        let bank = WordBank::empty();
        let (category, words) = resolve_words(&bank, "colors", true).unwrap();
        assert_eq!(category, ALPHABET);
        assert_eq!(words.len(), 26);
    }

    #[test]
    fn resolve_fails_without_any_words() {
        let bank = WordBank::empty();
        let err = resolve_words(&bank, "colors", false).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::NoWords {
                category: "colors".into()
            }
        );
    }
}
