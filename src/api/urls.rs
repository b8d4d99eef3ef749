//! Named-route to URI resolution. Every control href in the hypermedia
//! layer goes through these functions so the routing table in
//! `api::routes` stays the single source of truth for path shapes.

pub fn entry_point() -> String {
    "/api/".to_string()
}

pub fn synset_collection() -> String {
    "/api/synsets/".to_string()
}

/// Collection URI at a pagination offset. Offset zero is the canonical
/// unparameterized URI.
pub fn synset_collection_page(start: usize) -> String {
    if start == 0 {
        synset_collection()
    } else {
        format!("/api/synsets/?start={}", start)
    }
}

pub fn synset_item(wnid: &str) -> String {
    format!("/api/synsets/{}/", wnid)
}

pub fn synset_hyponym_collection(wnid: &str) -> String {
    format!("/api/synsets/{}/hyponyms/", wnid)
}

pub fn synset_hyponym_collection_page(wnid: &str, start: usize) -> String {
    if start == 0 {
        synset_hyponym_collection(wnid)
    } else {
        format!("/api/synsets/{}/hyponyms/?start={}", wnid, start)
    }
}

pub fn synset_hyponym_item(wnid: &str, hyponym_wnid: &str) -> String {
    format!("/api/synsets/{}/hyponyms/{}/", wnid, hyponym_wnid)
}

pub fn synset_image_collection(wnid: &str) -> String {
    format!("/api/synsets/{}/images/", wnid)
}

pub fn synset_image_collection_page(wnid: &str, start: usize) -> String {
    if start == 0 {
        synset_image_collection(wnid)
    } else {
        format!("/api/synsets/{}/images/?start={}", wnid, start)
    }
}

pub fn synset_image_item(wnid: &str, imid: &str) -> String {
    format!("/api/synsets/{}/images/{}/", wnid, imid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_zero_is_canonical_uri() {
        assert_eq!(synset_collection_page(0), "/api/synsets/");
        assert_eq!(synset_collection_page(50), "/api/synsets/?start=50");
        assert_eq!(
            synset_hyponym_collection_page("n00001740", 100),
            "/api/synsets/n00001740/hyponyms/?start=100"
        );
    }

    #[test]
    fn nested_item_uris() {
        assert_eq!(
            synset_hyponym_item("n00001740", "n00001930"),
            "/api/synsets/n00001740/hyponyms/n00001930/"
        );
        assert_eq!(
            synset_image_item("n00002684", "n00002684_18102"),
            "/api/synsets/n00002684/images/n00002684_18102/"
        );
    }
}
