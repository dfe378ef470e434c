use std::collections::{BTreeMap, HashMap};
use serde::{Deserialize, Serialize};

/// Word manifest describing every challenge category and its demonstration videos.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordManifest {
    /// Category key → ordered word list (e.g., "alphabet" → ["A", "B", ...]).
    pub categories: BTreeMap<String, Vec<String>>,
    /// Explicit video locators keyed by "category/word".
    #[serde(default)]
    pub videos: HashMap<String, String>,
    /// Raw recognizer label → canonical word (e.g., "thank_you" → "Thank You").
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    /// Prefix for derived video locators (default: "videos").
    #[serde(default = "default_video_root")]
    pub video_root: String,
}

fn default_video_root() -> String {
    "videos".to_string()
}

impl WordManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Key into `videos` for a (word, category) pair.
    pub fn video_key(word: &str, category: &str) -> String {
        format!("{}/{}", category, word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_videos() {
        let json = r#"{
            "categories": {
                "greetings": ["Hello", "Thank You"]
            },
            "videos": {
                "greetings/Hello": "https://cdn.example/hello.mp4"
            },
            "aliases": { "thank_you": "Thank You" }
        }"#;
        let manifest = WordManifest::from_json(json).unwrap();
        assert_eq!(manifest.categories["greetings"].len(), 2);
        assert_eq!(
            manifest.videos[&WordManifest::video_key("Hello", "greetings")],
            "https://cdn.example/hello.mp4"
        );
        assert_eq!(manifest.aliases["thank_you"], "Thank You");
        assert_eq!(manifest.video_root, "videos");
    }

    #[test]
    fn parse_minimal_manifest() {
        let json = r#"{ "categories": { "alphabet": ["A", "B"] }, "video_root": "media" }"#;
        let manifest = WordManifest::from_json(json).unwrap();
        assert_eq!(manifest.categories["alphabet"], vec!["A", "B"]);
        assert!(manifest.videos.is_empty());
        assert_eq!(manifest.video_root, "media");
    }
}
