use serde::Serialize;
use serde_json::{json, Map, Value};

/// A Mason hypermedia document: an ordered key/value object with reserved
/// `@namespaces`, `@controls`, and `@error` sections. Keys serialize in
/// insertion order, so entity fields stay ahead of the hypermedia blocks.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct MasonDocument(Map<String, Value>);

impl MasonDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document with the fields of a serializable entity.
    ///
    /// Anything that does not serialize to a JSON object yields an empty
    /// document instead of an error; the builder never fails.
    pub fn for_entity<T: Serialize>(entity: &T) -> Self {
        match serde_json::to_value(entity) {
            Ok(Value::Object(fields)) => Self(fields),
            _ => Self::default(),
        }
    }

    /// Set a plain field. Unserializable values degrade to `null`.
    pub fn insert<T: Serialize>(&mut self, key: &str, value: T) {
        self.0.insert(
            key.to_string(),
            serde_json::to_value(value).unwrap_or_default(),
        );
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Register a link-relation namespace. Last write for a prefix wins.
    pub fn add_namespace(&mut self, ns: &str, uri: &str) {
        let namespaces = self
            .0
            .entry("@namespaces")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(entries) = namespaces {
            entries.insert(ns.to_string(), json!({ "name": uri }));
        }
    }

    /// Register a named control. Re-adding the same name overwrites it.
    pub fn add_control(&mut self, name: &str, control: Control) {
        let controls = self
            .0
            .entry("@controls")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(entries) = controls {
            entries.insert(
                name.to_string(),
                serde_json::to_value(control).unwrap_or_default(),
            );
        }
    }

    pub fn control(&self, name: &str) -> Option<&Value> {
        self.0.get("@controls")?.get(name)
    }

    /// Set the `@error` section. Mason allows multiple messages but a single
    /// one is enough here, so `details` becomes a one-element array.
    pub fn add_error(&mut self, title: &str, details: &str) {
        self.0.insert(
            "@error".to_string(),
            json!({
                "@message": title,
                "@messages": [details],
            }),
        );
    }
}

/// A single Mason control: a target href plus optional method, encoding,
/// human-readable title, and JSON schema for the request body.
#[derive(Debug, Clone, Serialize)]
pub struct Control {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl Control {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            method: None,
            encoding: None,
            title: None,
            schema: None,
        }
    }

    pub fn method(mut self, method: &str) -> Self {
        self.method = Some(method.to_string());
        self
    }

    pub fn encoding(mut self, encoding: &str) -> Self {
        self.encoding = Some(encoding.to_string());
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_last_write_wins() {
        let mut doc = MasonDocument::new();
        doc.add_namespace("imagenet_browser", "/old/");
        doc.add_namespace("imagenet_browser", "/new/");

        let ns = doc.get("@namespaces").unwrap();
        assert_eq!(ns["imagenet_browser"]["name"], "/new/");
    }

    #[test]
    fn control_overwrites_on_readd() {
        let mut doc = MasonDocument::new();
        doc.add_control("self", Control::new("/api/synsets/n01/"));
        doc.add_control("self", Control::new("/api/synsets/n02/"));

        assert_eq!(doc.control("self").unwrap()["href"], "/api/synsets/n02/");
    }

    #[test]
    fn control_serializes_only_set_options() {
        let mut doc = MasonDocument::new();
        doc.add_control(
            "edit",
            Control::new("/api/synsets/n01/")
                .method("PUT")
                .encoding("json")
                .title("Edit this synset"),
        );

        let control = doc.control("edit").unwrap();
        assert_eq!(control["href"], "/api/synsets/n01/");
        assert_eq!(control["method"], "PUT");
        assert_eq!(control["encoding"], "json");
        assert_eq!(control["title"], "Edit this synset");
        assert!(control.get("schema").is_none());
    }

    #[test]
    fn error_block_carries_single_message() {
        let mut doc = MasonDocument::new();
        doc.add_error("Not found", "No synset with WordNet ID of 'n00' found");

        let error = doc.get("@error").unwrap();
        assert_eq!(error["@message"], "Not found");
        assert_eq!(
            error["@messages"],
            json!(["No synset with WordNet ID of 'n00' found"])
        );
    }

    #[test]
    fn entity_fields_serialize_before_hypermedia_blocks() {
        #[derive(Serialize)]
        struct Entity {
            wnid: &'static str,
        }

        let mut doc = MasonDocument::for_entity(&Entity { wnid: "n01" });
        doc.add_namespace("imagenet_browser", "/imagenet_browser/link-relations/");
        doc.add_control("self", Control::new("/api/synsets/n01/"));

        let rendered = serde_json::to_string(&doc).unwrap();
        let wnid_at = rendered.find("wnid").unwrap();
        let ns_at = rendered.find("@namespaces").unwrap();
        let controls_at = rendered.find("@controls").unwrap();
        assert!(wnid_at < ns_at);
        assert!(ns_at < controls_at);
    }
}
