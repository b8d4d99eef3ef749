//! The domain control vocabulary: one method per mutating affordance the
//! API advertises. Each is a composition of route URL resolution and
//! `add_control`; no validation logic lives here.

use crate::api::urls;
use crate::hypermedia::builder::{Control, MasonDocument};
use crate::model::{Image, Synset};

impl MasonDocument {
    /// `imagenet_browser:add_synset` on the synset collection.
    pub fn add_control_add_synset(&mut self) {
        self.add_control(
            "imagenet_browser:add_synset",
            Control::new(urls::synset_collection())
                .method("POST")
                .encoding("json")
                .title("Add a new synset")
                .schema(Synset::json_schema()),
        );
    }

    /// `edit` on a synset item.
    pub fn add_control_edit_synset(&mut self, wnid: &str) {
        self.add_control(
            "edit",
            Control::new(urls::synset_item(wnid))
                .method("PUT")
                .encoding("json")
                .title("Edit this synset")
                .schema(Synset::json_schema()),
        );
    }

    /// `imagenet_browser:delete` on a synset item.
    pub fn add_control_delete_synset(&mut self, wnid: &str) {
        self.add_control(
            "imagenet_browser:delete",
            Control::new(urls::synset_item(wnid))
                .method("DELETE")
                .title("Delete this synset"),
        );
    }

    /// `imagenet_browser:add_hyponym` on a hyponym collection. Linking an
    /// existing synset only needs its key, hence the wnid-only schema.
    pub fn add_control_add_hyponym(&mut self, wnid: &str) {
        self.add_control(
            "imagenet_browser:add_hyponym",
            Control::new(urls::synset_hyponym_collection(wnid))
                .method("POST")
                .encoding("json")
                .title("Add a new hyponym")
                .schema(Synset::wnid_only_schema()),
        );
    }

    /// `imagenet_browser:delete` on a hyponym item.
    pub fn add_control_delete_hyponym(&mut self, wnid: &str, hyponym_wnid: &str) {
        self.add_control(
            "imagenet_browser:delete",
            Control::new(urls::synset_hyponym_item(wnid, hyponym_wnid))
                .method("DELETE")
                .title("Delete this hyponym"),
        );
    }

    /// `imagenet_browser:add_image` on an image collection.
    pub fn add_control_add_image(&mut self, wnid: &str) {
        self.add_control(
            "imagenet_browser:add_image",
            Control::new(urls::synset_image_collection(wnid))
                .method("POST")
                .encoding("json")
                .title("Add a new image")
                .schema(Image::json_schema()),
        );
    }

    /// `edit` on an image item.
    pub fn add_control_edit_image(&mut self, wnid: &str, imid: &str) {
        self.add_control(
            "edit",
            Control::new(urls::synset_image_item(wnid, imid))
                .method("PUT")
                .encoding("json")
                .title("Edit this image")
                .schema(Image::json_schema()),
        );
    }

    /// `imagenet_browser:delete` on an image item.
    pub fn add_control_delete_image(&mut self, wnid: &str, imid: &str) {
        self.add_control(
            "imagenet_browser:delete",
            Control::new(urls::synset_image_item(wnid, imid))
                .method("DELETE")
                .title("Delete this image"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_synset_control_targets_collection_with_schema() {
        let mut doc = MasonDocument::new();
        doc.add_control_add_synset();

        let control = doc.control("imagenet_browser:add_synset").unwrap();
        assert_eq!(control["href"], "/api/synsets/");
        assert_eq!(control["method"], "POST");
        assert_eq!(control["encoding"], "json");
        assert_eq!(control["schema"]["required"][0], "wnid");
    }

    #[test]
    fn hyponym_affordance_uses_wnid_only_schema() {
        let mut doc = MasonDocument::new();
        doc.add_control_add_hyponym("n00001740");

        let control = doc.control("imagenet_browser:add_hyponym").unwrap();
        assert_eq!(control["href"], "/api/synsets/n00001740/hyponyms/");
        assert_eq!(control["schema"]["required"], serde_json::json!(["wnid"]));
    }

    #[test]
    fn delete_controls_carry_no_schema() {
        let mut doc = MasonDocument::new();
        doc.add_control_delete_image("n00002684", "n00002684_18102");

        let control = doc.control("imagenet_browser:delete").unwrap();
        assert_eq!(
            control["href"],
            "/api/synsets/n00002684/images/n00002684_18102/"
        );
        assert_eq!(control["method"], "DELETE");
        assert!(control.get("schema").is_none());
    }
}
