use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A WordNet concept node: unique WordNet ID, display words, and gloss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synset {
    pub wnid: String,
    pub words: String,
    pub gloss: String,
}

impl Synset {
    /// Validation schema for creating or replacing a synset.
    pub fn json_schema() -> Value {
        json!({
            "type": "object",
            "required": ["wnid", "words", "gloss"],
            "properties": {
                "wnid": {
                    "description": "WordNet ID of the synset",
                    "type": "string"
                },
                "words": {
                    "description": "Words of the synset",
                    "type": "string"
                },
                "gloss": {
                    "description": "Gloss of the synset",
                    "type": "string"
                }
            }
        })
    }

    /// Identifier-only schema used when linking an existing synset as a
    /// hyponym; no new entity is created so only the key is required.
    pub fn wnid_only_schema() -> Value {
        json!({
            "type": "object",
            "required": ["wnid"],
            "properties": {
                "wnid": {
                    "description": "WordNet ID of the synset",
                    "type": "string"
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::validate;

    #[test]
    fn schema_accepts_full_synset() {
        let document = json!({
            "wnid": "n00001930",
            "words": "physical entity",
            "gloss": "an entity that has physical existence"
        });
        assert!(validate(&Synset::json_schema(), &document).is_ok());
    }

    #[test]
    fn schema_rejects_missing_gloss() {
        let document = json!({ "wnid": "n00001930", "words": "physical entity" });
        assert!(validate(&Synset::json_schema(), &document).is_err());
    }

    #[test]
    fn schema_rejects_non_string_words() {
        let document = json!({ "wnid": "n00001930", "words": 7, "gloss": "..." });
        assert!(validate(&Synset::json_schema(), &document).is_err());
    }

    #[test]
    fn wnid_only_schema_needs_just_the_key() {
        let document = json!({ "wnid": "n00002137" });
        assert!(validate(&Synset::wnid_only_schema(), &document).is_ok());
        assert!(validate(&Synset::wnid_only_schema(), &json!({})).is_err());
    }
}
