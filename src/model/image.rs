use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// An image owned by exactly one synset. Only descriptive metadata is kept;
/// the bytes live behind the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub imid: String,
    pub url: String,
    #[serde(default)]
    pub date: Option<String>,
}

impl Image {
    /// Validation schema for creating or replacing an image.
    pub fn json_schema() -> Value {
        json!({
            "type": "object",
            "required": ["imid", "url"],
            "properties": {
                "imid": {
                    "description": "ImageNet ID of the image",
                    "type": "string"
                },
                "url": {
                    "description": "URL of the image",
                    "type": "string"
                },
                "date": {
                    "description": "Capture date of the image",
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
    fn schema_accepts_image_without_date() {
        let document = json!({
            "imid": "n00002684_18102",
            "url": "http://farm1.static.flickr.com/45/139488995_bd06578562.jpg"
        });
        assert!(validate(&Image::json_schema(), &document).is_ok());
    }

    #[test]
    fn schema_rejects_missing_url() {
        let document = json!({ "imid": "n00002684_18102" });
        assert!(validate(&Image::json_schema(), &document).is_err());
    }

    #[test]
    fn schema_rejects_non_string_date() {
        let document = json!({
            "imid": "n00002684_18102",
            "url": "http://farm1.static.flickr.com/45/139488995_bd06578562.jpg",
            "date": 2010
        });
        assert!(validate(&Image::json_schema(), &document).is_err());
    }
}
